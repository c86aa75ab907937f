use std::sync::Arc;

use tokio::sync::RwLock;

use crate::application::repos::SummaryRepo;

use super::files::PostFileManager;

/// Orchestrates the summary index and the post files.
///
/// Mutations hold the write side of `gate` for their whole
/// load-modify-save-and-files sequence, so concurrent requests within one
/// process never interleave on the index. Reads take the read side.
#[derive(Clone)]
pub struct PostService {
    pub(crate) summary: Arc<dyn SummaryRepo>,
    pub(crate) files: PostFileManager,
    pub(crate) gate: Arc<RwLock<()>>,
}

impl PostService {
    pub fn new(summary: Arc<dyn SummaryRepo>, files: PostFileManager) -> Self {
        Self {
            summary,
            files,
            gate: Arc::new(RwLock::new(())),
        }
    }
}
