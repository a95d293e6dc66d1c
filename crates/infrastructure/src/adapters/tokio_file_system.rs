//! Real file system implementation.

use std::path::Path;

use tokio::fs;

use optic_application::ports::{FileSystem, FileSystemError};

/// Real file system implementation using `tokio::fs`.
#[derive(Debug, Clone, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    /// Creates a new `TokioFileSystem`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FileSystem for TokioFileSystem {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileSystemError> {
        fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FileSystemError::NotFound(path.to_path_buf())
            } else if e.kind() == std::io::ErrorKind::PermissionDenied {
                FileSystemError::PermissionDenied(path.to_path_buf())
            } else {
                FileSystemError::Io(e)
            }
        })
    }

    async fn is_file(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok_and(|m| m.is_file())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.png");
        tokio::fs::write(&path, b"not really a png").await.unwrap();

        let fs = TokioFileSystem::new();
        assert!(fs.is_file(&path).await);
        assert_eq!(fs.read_file(&path).await.unwrap(), b"not really a png");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");

        let fs = TokioFileSystem::new();
        assert!(!fs.is_file(&path).await);
        let err = fs.read_file(&path).await.unwrap_err();
        assert!(matches!(err, FileSystemError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let fs = TokioFileSystem::new();
        assert!(!fs.is_file(dir.path()).await);
    }
}
