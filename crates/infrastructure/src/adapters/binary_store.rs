//! In-memory binary payload store.
//!
//! Holds pasted or dropped payloads the host registers before building a
//! prompt-variable collection. Handles are the only thing that crosses
//! into the domain; bytes stay here until attachment resolution asks for
//! them.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use optic_application::ports::{BinaryStore, BinaryStoreError};
use optic_domain::BinaryHandle;

/// In-memory implementation of the `BinaryStore` port.
#[derive(Debug, Default)]
pub struct InMemoryBinaryStore {
    payloads: RwLock<HashMap<Uuid, Vec<u8>>>,
}

impl InMemoryBinaryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a payload and returns the handle to reference it by.
    pub async fn insert(&self, mime_type: impl Into<String>, data: Vec<u8>) -> BinaryHandle {
        let handle = BinaryHandle::new(mime_type);
        self.payloads.write().await.insert(handle.id, data);
        handle
    }

    /// Removes a payload, releasing its memory.
    pub async fn remove(&self, handle: &BinaryHandle) -> Option<Vec<u8>> {
        self.payloads.write().await.remove(&handle.id)
    }

    /// Returns the number of registered payloads.
    pub async fn len(&self) -> usize {
        self.payloads.read().await.len()
    }

    /// Returns true if no payloads are registered.
    pub async fn is_empty(&self) -> bool {
        self.payloads.read().await.is_empty()
    }
}

impl BinaryStore for InMemoryBinaryStore {
    async fn load(&self, handle: &BinaryHandle) -> Result<Vec<u8>, BinaryStoreError> {
        self.payloads
            .read()
            .await
            .get(&handle.id)
            .cloned()
            .ok_or(BinaryStoreError::NotFound(handle.id))
    }
}
