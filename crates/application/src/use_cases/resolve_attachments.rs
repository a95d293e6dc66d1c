//! Attachment resolution use case.
//!
//! Walks a collection's derived variables and loads every image payload:
//! URI references are read from disk, deferred binary payloads are
//! fetched from the store. Locations, text, and opaque values carry no
//! image and are skipped.

use optic_domain::{ImageAttachment, VariableValue};
use url::Url;

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{BinaryStore, FileSystem, FileSystemError};
use crate::variable_collection::VariableCollection;

/// Use case for resolving a collection's variables into image attachments.
pub struct ResolveAttachments<F: FileSystem, B: BinaryStore> {
    file_system: F,
    binary_store: B,
}

impl<F: FileSystem, B: BinaryStore> ResolveAttachments<F, B> {
    /// Creates a new `ResolveAttachments` use case.
    #[must_use]
    pub const fn new(file_system: F, binary_store: B) -> Self {
        Self {
            file_system,
            binary_store,
        }
    }

    /// Loads the image attachments for every variable in derived order.
    ///
    /// # Errors
    /// - A URI variable that does not point at a readable image file is an
    ///   error naming the variable, as is a non-`file://` scheme
    /// - A binary payload missing from the store is an error
    /// - Payloads with a non-image mime type are rejected
    pub async fn execute(
        &self,
        variables: &VariableCollection,
    ) -> ApplicationResult<Vec<ImageAttachment>> {
        let mut attachments = Vec::new();

        for variable in variables {
            match &variable.value {
                VariableValue::Uri(uri) => {
                    attachments.push(self.load_image_file(&variable.unique_name, uri).await?);
                }
                VariableValue::Binary(handle) => {
                    let data = self.binary_store.load(handle).await?;
                    attachments.push(ImageAttachment::new(handle.mime_type.clone(), data)?);
                }
                VariableValue::Location(_) | VariableValue::Text(_) | VariableValue::Other(_) => {
                    tracing::debug!(
                        name = %variable.unique_name,
                        kind = variable.value.kind_name(),
                        "skipping non-image variable"
                    );
                }
            }
        }

        Ok(attachments)
    }

    /// Reads an image file referenced by URI, sniffing the mime type from
    /// the path.
    async fn load_image_file(&self, name: &str, uri: &Url) -> ApplicationResult<ImageAttachment> {
        if uri.scheme() != "file" {
            return Err(ApplicationError::UnsupportedScheme {
                name: name.to_string(),
                scheme: uri.scheme().to_string(),
            });
        }

        let path = uri
            .to_file_path()
            .map_err(|()| ApplicationError::UnsupportedScheme {
                name: name.to_string(),
                scheme: uri.scheme().to_string(),
            })?;

        let mime = mime_guess::from_path(&path)
            .first()
            .ok_or_else(|| ApplicationError::NotAnImage {
                name: name.to_string(),
                detail: format!("unknown file type for {}", path.display()),
            })?;
        if mime.type_() != mime::IMAGE {
            return Err(ApplicationError::NotAnImage {
                name: name.to_string(),
                detail: mime.to_string(),
            });
        }

        if !self.file_system.is_file(&path).await {
            return Err(FileSystemError::NotAFile(path).into());
        }

        let data = self.file_system.read_file(&path).await?;
        Ok(ImageAttachment::new(mime.essence_str(), data)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    use optic_domain::{BinaryHandle, PromptReference, VariableValue};

    use crate::ports::BinaryStoreError;

    use super::*;

    struct MapFileSystem {
        files: HashMap<PathBuf, Vec<u8>>,
    }

    impl FileSystem for MapFileSystem {
        async fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileSystemError> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| FileSystemError::NotFound(path.to_path_buf()))
        }

        async fn is_file(&self, path: &Path) -> bool {
            self.files.contains_key(path)
        }
    }

    struct MapBinaryStore {
        payloads: HashMap<uuid::Uuid, Vec<u8>>,
    }

    impl BinaryStore for MapBinaryStore {
        async fn load(&self, handle: &BinaryHandle) -> Result<Vec<u8>, BinaryStoreError> {
            self.payloads
                .get(&handle.id)
                .cloned()
                .ok_or(BinaryStoreError::NotFound(handle.id))
        }
    }

    fn resolver(
        files: Vec<(&str, Vec<u8>)>,
        payloads: Vec<(uuid::Uuid, Vec<u8>)>,
    ) -> ResolveAttachments<MapFileSystem, MapBinaryStore> {
        ResolveAttachments::new(
            MapFileSystem {
                files: files
                    .into_iter()
                    .map(|(p, data)| (PathBuf::from(p), data))
                    .collect(),
            },
            MapBinaryStore {
                payloads: payloads.into_iter().collect(),
            },
        )
    }

    fn uri_ref(name: &str, uri: &str) -> PromptReference {
        PromptReference::new(name, VariableValue::Uri(Url::parse(uri).unwrap()))
    }

    #[tokio::test]
    async fn test_resolves_uri_and_binary_variables_in_order() {
        let handle = BinaryHandle::new("image/jpeg");
        let resolver = resolver(
            vec![("/tmp/cat.png", vec![1, 2, 3])],
            vec![(handle.id, vec![9, 9])],
        );

        let collection = VariableCollection::new(vec![
            uri_ref("cat", "file:///tmp/cat.png"),
            PromptReference::new("pasted", VariableValue::Binary(handle)),
            PromptReference::new("note", VariableValue::Text("hi".into())),
        ]);

        let attachments = resolver.execute(&collection).await.unwrap();
        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[0].mime_type, "image/png");
        assert_eq!(attachments[0].data, vec![1, 2, 3]);
        assert_eq!(attachments[1].mime_type, "image/jpeg");
        assert_eq!(attachments[1].data, vec![9, 9]);
    }

    #[tokio::test]
    async fn test_non_image_file_is_rejected() {
        let resolver = resolver(vec![("/tmp/report.pdf", vec![1])], Vec::new());
        let collection =
            VariableCollection::new(vec![uri_ref("report", "file:///tmp/report.pdf")]);

        let err = resolver.execute(&collection).await.unwrap_err();
        assert!(matches!(err, ApplicationError::NotAnImage { ref name, .. } if name == "report"));
    }

    #[tokio::test]
    async fn test_non_file_scheme_is_rejected() {
        let resolver = resolver(Vec::new(), Vec::new());
        let collection =
            VariableCollection::new(vec![uri_ref("remote", "https://example.com/cat.png")]);

        let err = resolver.execute(&collection).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::UnsupportedScheme { ref scheme, .. } if scheme == "https"
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_a_file() {
        let resolver = resolver(Vec::new(), Vec::new());
        let collection = VariableCollection::new(vec![uri_ref("cat", "file:///tmp/missing.png")]);

        let err = resolver.execute(&collection).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::FileSystem(FileSystemError::NotAFile(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_binary_payload_is_an_error() {
        let resolver = resolver(Vec::new(), Vec::new());
        let handle = BinaryHandle::new("image/png");
        let collection = VariableCollection::new(vec![PromptReference::new(
            "pasted",
            VariableValue::Binary(handle),
        )]);

        let err = resolver.execute(&collection).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::BinaryStore(BinaryStoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_binary_payload_with_non_image_mime_is_rejected() {
        let handle = BinaryHandle::new("application/octet-stream");
        let resolver = resolver(Vec::new(), vec![(handle.id, vec![0])]);
        let collection = VariableCollection::new(vec![PromptReference::new(
            "blob",
            VariableValue::Binary(handle),
        )]);

        let err = resolver.execute(&collection).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(_)));
    }
}
