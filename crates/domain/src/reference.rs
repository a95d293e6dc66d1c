//! Raw prompt reference types
//!
//! A [`PromptReference`] is what the host chat surface hands over for each
//! thing the user attached to a query: a name, an optional payload, and an
//! optional anchor span into the query text.

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// Half-open byte interval `[start, end)` into the original query text.
///
/// Offsets are byte offsets into UTF-8 text and must land on `char`
/// boundaries. The substitution engine does not validate them.
pub type Span = std::ops::Range<usize>;

/// A position inside a resource (file plus span within it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// The resource the location points into.
    pub uri: Url,
    /// Byte span within the resource.
    pub span: Span,
}

/// Handle to a deferred-loaded binary payload (e.g. a pasted image).
///
/// The bytes themselves live behind the `BinaryStore` port; the handle only
/// carries identity and mime type so the domain stays free of I/O.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryHandle {
    /// Unique identifier, used as the store key.
    pub id: Uuid,
    /// Mime type reported by the host (e.g. `image/png`).
    pub mime_type: String,
}

impl BinaryHandle {
    /// Creates a new handle with a fresh id.
    #[must_use]
    pub fn new(mime_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            mime_type: mime_type.into(),
        }
    }

    /// Returns true if the handle's mime type is an image type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// The payload of a prompt reference.
///
/// The collection engine never inspects a value beyond testing presence;
/// consumers pattern-match on the cases they understand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VariableValue {
    /// A URI-like locator (drag-and-drop file, workspace resource).
    Uri(Url),
    /// A position inside a resource.
    Location(Location),
    /// A deferred-loaded binary payload.
    Binary(BinaryHandle),
    /// A plain string value.
    Text(String),
    /// Opaque content the host did not further specify.
    Other(serde_json::Value),
}

impl VariableValue {
    /// Returns a short name for the payload kind, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Uri(_) => "uri",
            Self::Location(_) => "location",
            Self::Binary(_) => "binary",
            Self::Text(_) => "text",
            Self::Other(_) => "other",
        }
    }
}

/// A raw reference supplied by the host for one attached item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptReference {
    /// The name as it appeared in the source text or picker UI.
    pub name: String,

    /// The payload, if the host could resolve one. References without a
    /// payload are skipped during materialization.
    pub value: Option<VariableValue>,

    /// Span of the inline mention in the original query text, when the
    /// reference was typed rather than attached out-of-band.
    pub range: Option<Span>,
}

impl PromptReference {
    /// Creates a reference with a payload and no anchor span.
    #[must_use]
    pub fn new(name: impl Into<String>, value: VariableValue) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            range: None,
        }
    }

    /// Creates a reference anchored to a span of the query text.
    #[must_use]
    pub fn anchored(name: impl Into<String>, value: VariableValue, range: Span) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            range: Some(range),
        }
    }

    /// Creates a reference the host could not attach a payload to.
    #[must_use]
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            range: None,
        }
    }

    /// Returns true if this reference carries a payload.
    #[must_use]
    pub const fn has_value(&self) -> bool {
        self.value.is_some()
    }
}
