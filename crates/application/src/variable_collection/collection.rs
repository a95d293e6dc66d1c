//! The prompt-variable collection
//!
//! A read-only view over the host's raw references, scoped to one chat
//! turn: derivation is lazy and memoized, every accessor is a pure read,
//! and `reverse` builds a sibling collection instead of mutating.

use std::collections::HashMap;
use std::sync::OnceLock;

use optic_domain::{PromptReference, PromptVariable};

use super::substitution::{Replacement, apply_replacements, reference_marker};

/// An ordered, de-duplicated view of the prompt variables attached to one
/// chat query.
///
/// The raw source sequence is supplied once at construction and never
/// mutated. The derived [`PromptVariable`] list is computed on first
/// access and cached; the cache is an internal memoization detail, so
/// concurrent readers of one instance are safe without locking.
#[derive(Debug)]
pub struct VariableCollection {
    source: Vec<PromptReference>,
    variables: OnceLock<Vec<PromptVariable>>,
}

impl VariableCollection {
    /// Creates a collection over the host-supplied reference sequence.
    ///
    /// No validation happens here; derivation is deferred until the first
    /// accessor call.
    #[must_use]
    pub fn new(source: Vec<PromptReference>) -> Self {
        Self {
            source,
            variables: OnceLock::new(),
        }
    }

    /// Materializes the derived variable list, computing it at most once.
    fn variables(&self) -> &[PromptVariable] {
        self.variables.get_or_init(|| {
            let derived = derive_variables(&self.source);
            tracing::debug!(
                source_len = self.source.len(),
                derived_len = derived.len(),
                "materialized prompt variables"
            );
            derived
        })
    }

    /// Returns a new collection over a reversed copy of the raw source.
    ///
    /// Reversal happens at the source level, before derivation, so each
    /// variable's `range` stays attached to it regardless of iteration
    /// order. The original collection and its cache are unaffected.
    #[must_use]
    pub fn reverse(&self) -> Self {
        let mut source = self.source.clone();
        source.reverse();
        Self::new(source)
    }

    /// Returns the first derived variable matching `predicate`, scanning
    /// in derived order.
    pub fn find(
        &self,
        mut predicate: impl FnMut(&PromptVariable) -> bool,
    ) -> Option<&PromptVariable> {
        self.variables().iter().find(|variable| predicate(variable))
    }

    /// Iterates the derived variables in order. Restartable; each call
    /// starts from the beginning.
    pub fn iter(&self) -> std::slice::Iter<'_, PromptVariable> {
        self.variables().iter()
    }

    /// Returns true if the derived sequence is non-empty.
    #[must_use]
    pub fn has_variables(&self) -> bool {
        !self.variables().is_empty()
    }

    /// Returns the number of derived variables.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.variables().len()
    }

    /// Rewrites `text`, replacing each anchored variable's span with the
    /// marker `[#unique_name](#unique_name-context)`.
    ///
    /// Unanchored variables contribute nothing and do not appear in the
    /// rewritten text. With no anchored variables the input is returned
    /// unchanged.
    ///
    /// Spans are byte offsets into `text` and are a caller precondition:
    /// they must be well-formed (`start <= end`, in bounds, on `char`
    /// boundaries) and pairwise non-overlapping. Neither is checked here;
    /// clamping would mask upstream bugs. Edits are applied in descending
    /// end-offset order (ties broken by descending start) so earlier edits
    /// never shift the spans still to be applied.
    #[must_use]
    pub fn substitute_variables_with_references(&self, text: &str) -> String {
        let replacements: Vec<Replacement> = self
            .variables()
            .iter()
            .filter_map(|variable| {
                variable.range.as_ref().map(|range| Replacement {
                    start: range.start,
                    end: range.end,
                    new_text: reference_marker(&variable.unique_name),
                })
            })
            .collect();

        if replacements.is_empty() {
            return text.to_string();
        }

        tracing::debug!(count = replacements.len(), "substituting variable references");
        apply_replacements(text, replacements)
    }
}

impl<'a> IntoIterator for &'a VariableCollection {
    type Item = &'a PromptVariable;
    type IntoIter = std::slice::Iter<'a, PromptVariable>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<PromptReference> for VariableCollection {
    fn from_iter<T: IntoIterator<Item = PromptReference>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Derives the normalized variable list from the raw source, in order,
/// skipping references without a payload.
///
/// Unique naming: the first occurrence of a base name keeps it; the n-th
/// duplicate becomes `{name}-{n}`, counted per base name. Host-supplied
/// names are trusted not to collide with generated suffixed names.
fn derive_variables(source: &[PromptReference]) -> Vec<PromptVariable> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut variables = Vec::new();

    for reference in source {
        let Some(value) = reference.value.clone() else {
            continue;
        };

        let occurrence = seen.entry(reference.name.as_str()).or_insert(0);
        *occurrence += 1;
        let unique_name = if *occurrence == 1 {
            reference.name.clone()
        } else {
            format!("{}-{}", reference.name, *occurrence)
        };

        variables.push(PromptVariable {
            original_name: reference.name.clone(),
            unique_name,
            value,
            range: reference.range.clone(),
        });
    }

    variables
}
