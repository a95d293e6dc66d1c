//! Chat client port.

use std::future::Future;

use optic_domain::{ChatCompletion, ChatRequest};

/// Error type for chat client operations.
#[derive(Debug, thiserror::Error)]
pub enum ChatClientError {
    /// The request timed out.
    #[error("chat request timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// Could not reach the endpoint.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The endpoint returned a non-success status.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error body or status text.
        message: String,
    },

    /// The response body could not be interpreted.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Any other client failure.
    #[error("chat client error: {0}")]
    Other(String),
}

/// Port for sending a vision chat request to a language model endpoint.
///
/// This trait abstracts the HTTP client implementation, allowing the
/// application layer to be independent of specific transport libraries.
pub trait ChatClient: Send + Sync {
    /// Sends the request and returns the model's completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or an endpoint-side error.
    fn complete(
        &self,
        request: &ChatRequest,
    ) -> impl Future<Output = Result<ChatCompletion, ChatClientError>> + Send;
}
