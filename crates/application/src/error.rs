//! Application error types

use thiserror::Error;

use optic_domain::DomainError;

use crate::ports::{BinaryStoreError, ChatClientError, FileSystemError};

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// A file system operation failed.
    #[error("file system error: {0}")]
    FileSystem(#[from] FileSystemError),

    /// A binary payload could not be loaded.
    #[error("binary store error: {0}")]
    BinaryStore(#[from] BinaryStoreError),

    /// The chat client failed.
    #[error("chat client error: {0}")]
    Chat(#[from] ChatClientError),

    /// The query carried no usable prompt variables.
    #[error("the query has no prompt variables attached")]
    NoVariables,

    /// A referenced file is not an image.
    #[error("variable '{name}' does not reference an image: {detail}")]
    NotAnImage {
        /// The variable's unique name.
        name: String,
        /// What was found instead.
        detail: String,
    },

    /// A URI payload uses a scheme the attachment resolver cannot read.
    #[error("variable '{name}' has unsupported URI scheme '{scheme}'")]
    UnsupportedScheme {
        /// The variable's unique name.
        name: String,
        /// The offending scheme.
        scheme: String,
    },
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
