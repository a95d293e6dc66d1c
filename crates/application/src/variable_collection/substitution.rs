//! Batch text substitution for anchored variables
//!
//! Replacements are applied against the original string in order of
//! decreasing end offset, so an edit already applied never shifts the
//! offsets of edits still to be applied (for non-overlapping spans).

/// A pending edit against the original query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Replacement {
    /// Start byte offset (inclusive) in the original text.
    pub start: usize,
    /// End byte offset (exclusive) in the original text.
    pub end: usize,
    /// The marker text that replaces the span.
    pub new_text: String,
}

/// Builds the inline marker for a variable's unique name.
pub(crate) fn reference_marker(unique_name: &str) -> String {
    format!("[#{unique_name}](#{unique_name}-context)")
}

/// Applies all replacements to `text` and returns the rewritten string.
///
/// Ordering: end offset descending, then start offset descending for equal
/// ends, so zero-width insertions at a span's end land after the span's
/// own replacement. Spans must be non-overlapping, within bounds, and on
/// `char` boundaries; this function does not check.
pub(crate) fn apply_replacements(text: &str, mut replacements: Vec<Replacement>) -> String {
    replacements.sort_unstable_by(|a, b| b.end.cmp(&a.end).then(b.start.cmp(&a.start)));

    let mut rewritten = text.to_string();
    for replacement in &replacements {
        rewritten.replace_range(replacement.start..replacement.end, &replacement.new_text);
    }
    rewritten
}
