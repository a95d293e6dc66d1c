//! Optic Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - The prompt-variable collection and substitution engine
//! - Port traits (interfaces for external dependencies)
//! - Use case orchestration
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod use_cases;
pub mod variable_collection;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{
    BinaryStore, BinaryStoreError, ChatClient, ChatClientError, FileSystem, FileSystemError,
};
pub use use_cases::{ExecuteVisionQuery, ResolveAttachments, VisionQueryInput, VisionQueryOutput};
pub use variable_collection::VariableCollection;
