//! Markdown rendering.
//!
//! The pipeline is pure: it accepts markdown input and produces HTML or a
//! structured error. Reading and writing the files around it is the caller's
//! job.

mod service;
mod types;

pub use service::ComrakRenderService;
pub use types::{RenderError, RenderOptions, RenderService};
