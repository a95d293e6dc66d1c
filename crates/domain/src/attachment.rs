//! Resolved image attachments

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A fully loaded image payload ready to be shipped with a chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// Image mime type (always `image/*`).
    pub mime_type: String,

    /// Raw image bytes.
    pub data: Vec<u8>,
}

impl ImageAttachment {
    /// Creates an attachment, validating the mime type.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidMimeType`] for an empty mime type and
    /// [`DomainError::NotAnImage`] for any type outside `image/*`.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> DomainResult<Self> {
        let mime_type = mime_type.into();
        if mime_type.is_empty() {
            return Err(DomainError::InvalidMimeType(mime_type));
        }
        if !mime_type.starts_with("image/") {
            return Err(DomainError::NotAnImage(mime_type));
        }
        Ok(Self { mime_type, data })
    }

    /// Returns the size of the payload in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_accepts_image_mime() {
        let attachment = ImageAttachment::new("image/jpeg", vec![0xff, 0xd8]).unwrap();
        assert_eq!(attachment.mime_type, "image/jpeg");
        assert_eq!(attachment.len(), 2);
    }

    #[test]
    fn test_attachment_rejects_non_image_mime() {
        let err = ImageAttachment::new("text/plain", vec![]).unwrap_err();
        assert_eq!(err, DomainError::NotAnImage("text/plain".to_string()));
    }

    #[test]
    fn test_attachment_rejects_empty_mime() {
        let err = ImageAttachment::new("", vec![]).unwrap_err();
        assert_eq!(err, DomainError::InvalidMimeType(String::new()));
    }
}
