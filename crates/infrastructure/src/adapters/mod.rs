//! Port adapters

mod binary_store;
mod openai_client;
mod tokio_file_system;

pub use binary_store::InMemoryBinaryStore;
pub use openai_client::{OpenAiChatClient, OpenAiConfig};
pub use tokio_file_system::TokioFileSystem;
