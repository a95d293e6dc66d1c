//! End-to-end flow: host references -> collection -> substitution ->
//! request assembly, using the real file system and binary store adapters
//! and a canned chat client.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use optic_application::ports::{ChatClient, ChatClientError};
use optic_application::use_cases::{ExecuteVisionQuery, ResolveAttachments, VisionQueryInput};
use optic_application::variable_collection::VariableCollection;
use optic_domain::{ChatCompletion, ChatRequest, PromptReference, VariableValue};
use optic_infrastructure::{InMemoryBinaryStore, TokioFileSystem};

/// Records the request it was handed and replies with a canned answer.
struct CannedChatClient {
    seen: Arc<Mutex<Option<ChatRequest>>>,
}

impl ChatClient for CannedChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, ChatClientError> {
        *self.seen.lock().unwrap() = Some(request.clone());
        Ok(ChatCompletion::new("two cats on a sofa"))
    }
}

#[tokio::test]
async fn vision_query_flow_with_file_and_pasted_image() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("sofa.jpg");
    tokio::fs::write(&file_path, vec![0xff, 0xd8, 0xff]).await.unwrap();
    let file_uri = url::Url::from_file_path(&file_path).unwrap();

    let store = InMemoryBinaryStore::new();
    let pasted = store.insert("image/png", vec![0x89, 0x50]).await;

    // The inline mention "#sofa" occupies bytes 8..13 of the query.
    let query = "compare #sofa with the pasted one";
    let collection = VariableCollection::new(vec![
        PromptReference::anchored("sofa", VariableValue::Uri(file_uri), 8..13),
        PromptReference::new("pasted", VariableValue::Binary(pasted)),
    ]);
    assert!(collection.has_variables());

    let seen = Arc::new(Mutex::new(None));
    let use_case = ExecuteVisionQuery::new(
        ResolveAttachments::new(TokioFileSystem::new(), store),
        CannedChatClient { seen: seen.clone() },
    );

    let output = use_case
        .execute(&collection, VisionQueryInput::new(query))
        .await
        .unwrap();

    assert_eq!(
        output.rewritten_query,
        "compare [#sofa](#sofa-context) with the pasted one"
    );
    assert_eq!(output.attachment_count, 2);
    assert_eq!(output.completion.content, "two cats on a sofa");

    let request = seen.lock().unwrap().clone().unwrap();
    assert_eq!(request.query, "compare [#sofa](#sofa-context) with the pasted one");
    assert_eq!(request.attachments.len(), 2);
    assert_eq!(request.attachments[0].mime_type, "image/jpeg");
    assert_eq!(request.attachments[0].data, vec![0xff, 0xd8, 0xff]);
    assert_eq!(request.attachments[1].mime_type, "image/png");
    assert_eq!(request.attachments[1].data, vec![0x89, 0x50]);
}

#[tokio::test]
async fn vision_query_without_variables_is_refused() {
    let use_case = ExecuteVisionQuery::new(
        ResolveAttachments::new(TokioFileSystem::new(), InMemoryBinaryStore::new()),
        CannedChatClient {
            seen: Arc::new(Mutex::new(None)),
        },
    );

    let collection = VariableCollection::new(Vec::new());
    let result = use_case
        .execute(&collection, VisionQueryInput::new("what is this?"))
        .await;
    assert!(result.is_err());
}
