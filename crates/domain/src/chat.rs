//! Chat request and completion types
//!
//! Pure data carried between the use-case layer and the chat-client
//! adapter. The wire format (data URLs, message JSON) is the adapter's
//! concern.

use serde::{Deserialize, Serialize};

use crate::attachment::ImageAttachment;

const DEFAULT_MODEL: &str = "gpt-4o";

/// A vision chat request: rewritten query text plus image attachments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier to request.
    pub model: String,

    /// Optional system prompt.
    pub system_prompt: Option<String>,

    /// The user query, already rewritten with substitution markers.
    pub query: String,

    /// Image attachments, in derived-variable order.
    pub attachments: Vec<ImageAttachment>,
}

impl ChatRequest {
    /// Creates a request for the default model with no system prompt.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_prompt: None,
            query: query.into(),
            attachments: Vec::new(),
        }
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Sets the attachments.
    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<ImageAttachment>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// The model's reply to a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletion {
    /// Concatenated text content of the reply.
    pub content: String,
}

impl ChatCompletion {
    /// Creates a completion from reply text.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
