//! Binary payload store port.

use std::future::Future;

use optic_domain::BinaryHandle;

/// Error type for binary store operations.
#[derive(Debug, thiserror::Error)]
pub enum BinaryStoreError {
    /// No payload is registered for the handle.
    #[error("no payload registered for handle {0}")]
    NotFound(uuid::Uuid),

    /// The store backend failed.
    #[error("binary store failure: {0}")]
    Other(String),
}

/// Port for loading deferred binary payloads (pasted images and other
/// out-of-band blobs the host registered).
pub trait BinaryStore: Send + Sync {
    /// Loads the bytes behind a handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is unknown or the backend fails.
    fn load(
        &self,
        handle: &BinaryHandle,
    ) -> impl Future<Output = Result<Vec<u8>, BinaryStoreError>> + Send;
}
