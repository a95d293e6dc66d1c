//! Vision query use case.
//!
//! The end-to-end flow for one chat turn: gate on attached variables,
//! load image payloads, rewrite the query with substitution markers, and
//! send the assembled request through the chat client.

use optic_domain::{ChatCompletion, ChatRequest};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{BinaryStore, ChatClient, FileSystem};
use crate::use_cases::ResolveAttachments;
use crate::variable_collection::VariableCollection;

/// Input for executing a vision query.
#[derive(Debug, Clone)]
pub struct VisionQueryInput {
    /// The raw user query text.
    pub query: String,
    /// Model override; the request default is used when absent.
    pub model: Option<String>,
    /// System prompt override.
    pub system_prompt: Option<String>,
}

impl VisionQueryInput {
    /// Creates an input with just the query text.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            model: None,
            system_prompt: None,
        }
    }
}

/// Output from executing a vision query.
#[derive(Debug, Clone)]
pub struct VisionQueryOutput {
    /// The query text after marker substitution.
    pub rewritten_query: String,
    /// Number of image attachments sent with the request.
    pub attachment_count: usize,
    /// The model's reply.
    pub completion: ChatCompletion,
}

/// Use case for answering a user query about attached images.
pub struct ExecuteVisionQuery<F: FileSystem, B: BinaryStore, C: ChatClient> {
    attachments: ResolveAttachments<F, B>,
    chat_client: C,
}

impl<F: FileSystem, B: BinaryStore, C: ChatClient> ExecuteVisionQuery<F, B, C> {
    /// Creates a new `ExecuteVisionQuery` use case.
    #[must_use]
    pub const fn new(attachments: ResolveAttachments<F, B>, chat_client: C) -> Self {
        Self {
            attachments,
            chat_client,
        }
    }

    /// Runs the full flow for one chat turn.
    ///
    /// # Errors
    /// - [`ApplicationError::NoVariables`] if the collection derives no
    ///   variables; the surrounding UI turns this into its "attach a
    ///   picture" message
    /// - Attachment resolution and chat client errors are propagated
    pub async fn execute(
        &self,
        variables: &VariableCollection,
        input: VisionQueryInput,
    ) -> ApplicationResult<VisionQueryOutput> {
        if !variables.has_variables() {
            return Err(ApplicationError::NoVariables);
        }

        let attachments = self.attachments.execute(variables).await?;
        let rewritten_query = variables.substitute_variables_with_references(&input.query);

        let mut request = ChatRequest::new(rewritten_query.clone()).with_attachments(attachments);
        if let Some(model) = input.model {
            request = request.with_model(model);
        }
        if let Some(system_prompt) = input.system_prompt {
            request = request.with_system_prompt(system_prompt);
        }

        tracing::info!(
            model = %request.model,
            attachments = request.attachments.len(),
            "dispatching vision query"
        );

        let attachment_count = request.attachments.len();
        let completion = self.chat_client.complete(&request).await?;

        Ok(VisionQueryOutput {
            rewritten_query,
            attachment_count,
            completion,
        })
    }
}
