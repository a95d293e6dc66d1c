//! Prompt-variable collection and substitution engine
//!
//! Derives a normalized, order-stable view of the host's raw prompt
//! references and rewrites query text so that inline mentions become
//! stable markers keyed by each variable's unique name.

mod collection;
mod substitution;

pub use collection::VariableCollection;
