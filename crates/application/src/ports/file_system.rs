//! File system abstraction port.

use std::future::Future;
use std::path::{Path, PathBuf};

/// Error type for file system operations.
#[derive(Debug, thiserror::Error)]
pub enum FileSystemError {
    /// File not found.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Path is not a file.
    #[error("path is not a file: {0}")]
    NotAFile(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Abstraction over the file system reads the attachment resolver needs.
///
/// This trait allows mocking file access in tests.
pub trait FileSystem: Send + Sync {
    /// Reads a file's contents as bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read_file(
        &self,
        path: &Path,
    ) -> impl Future<Output = Result<Vec<u8>, FileSystemError>> + Send;

    /// Checks if a path is a file.
    fn is_file(&self, path: &Path) -> impl Future<Output = bool> + Send;
}
