//! Use case orchestration

mod execute_vision_query;
mod resolve_attachments;

pub use execute_vision_query::{ExecuteVisionQuery, VisionQueryInput, VisionQueryOutput};
pub use resolve_attachments::ResolveAttachments;
