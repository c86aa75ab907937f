//! Post lifecycle: create, edit and delete posts while keeping the summary
//! index and the Markdown/HTML file pairs in step.

mod commands;
mod files;
mod queries;
mod service;
mod types;

pub use files::PostFileManager;
pub use service::PostService;
pub use types::{GenerationError, PostError, RenderedPost};
