//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The payload's mime type is not an image type.
    #[error("not an image mime type: {0}")]
    NotAnImage(String),

    /// A mime type string is empty or malformed.
    #[error("invalid mime type: {0}")]
    InvalidMimeType(String),

    /// A reference name is empty.
    #[error("empty reference name")]
    EmptyReferenceName,
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
