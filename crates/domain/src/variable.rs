//! Derived prompt variable

use serde::{Deserialize, Serialize};

use crate::reference::{Span, VariableValue};

/// A normalized prompt variable derived from a raw reference.
///
/// Immutable once constructed. `unique_name` is distinct among the
/// variables of one collection and is what substitution markers and
/// reverse-lookup anchors are built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptVariable {
    /// The name as it appeared in the source text/UI.
    pub original_name: String,

    /// Collection-unique name used for markers and anchors.
    pub unique_name: String,

    /// The payload carried through from the raw reference.
    pub value: VariableValue,

    /// Anchor span into the original query text, if the variable was
    /// mentioned inline.
    pub range: Option<Span>,
}

impl PromptVariable {
    /// Returns true if this variable is anchored to a span of the query.
    #[must_use]
    pub const fn is_anchored(&self) -> bool {
        self.range.is_some()
    }
}
