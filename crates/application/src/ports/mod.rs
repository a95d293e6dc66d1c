//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external
//! systems. Each port is a trait that can be implemented by adapters in
//! the infrastructure layer.

mod binary_store;
mod chat_client;
mod file_system;

pub use binary_store::{BinaryStore, BinaryStoreError};
pub use chat_client::{ChatClient, ChatClientError};
pub use file_system::{FileSystem, FileSystemError};
