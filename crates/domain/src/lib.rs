//! Optic Domain - Core business types
//!
//! This crate defines the domain model for the Optic vision chat
//! assistant. All types here are pure Rust with no I/O dependencies.

pub mod attachment;
pub mod chat;
pub mod error;
pub mod reference;
pub mod variable;

pub use attachment::ImageAttachment;
pub use chat::{ChatCompletion, ChatRequest};
pub use error::{DomainError, DomainResult};
pub use reference::{BinaryHandle, Location, PromptReference, Span, VariableValue};
pub use variable::PromptVariable;
