use std::sync::Arc;

use tracing::warn;

use crate::application::render::RenderService;
use crate::application::repos::{PostFilesRepo, RepoError};

use super::types::GenerationError;

/// The Markdown/HTML pair behind each post, plus the renderer that derives
/// one from the other.
#[derive(Clone)]
pub struct PostFileManager {
    repo: Arc<dyn PostFilesRepo>,
    renderer: Arc<dyn RenderService>,
}

impl PostFileManager {
    pub fn new(repo: Arc<dyn PostFilesRepo>, renderer: Arc<dyn RenderService>) -> Self {
        Self { repo, renderer }
    }

    pub async fn write_markdown(&self, name: &str, body: &str) -> Result<(), RepoError> {
        self.repo.write_markdown(name, body).await
    }

    /// Render `<name>.md` into `<name>.html`.
    pub async fn render(&self, name: &str) -> Result<(), GenerationError> {
        let markdown = self.repo.read_markdown(name).await?;
        let html = self.renderer.render(&markdown)?;
        self.repo.write_html(name, &html).await?;
        Ok(())
    }

    /// Persist `body` as the post source and render it.
    pub async fn generate(&self, name: &str, body: &str) -> Result<(), GenerationError> {
        self.write_markdown(name, body).await?;
        self.render(name).await
    }

    /// Best-effort removal of whatever a failed [`generate`](Self::generate) left behind.
    pub async fn discard(&self, name: &str) {
        if let Err(err) = self.repo.remove(name).await {
            warn!(
                target = "scriptorium::posts",
                post = name,
                error = %err,
                "failed to clean up partial post files"
            );
        }
    }

    pub async fn remove(&self, name: &str) -> Result<(), RepoError> {
        self.repo.remove(name).await
    }

    pub async fn rename(&self, from: &str, to: &str) -> Result<(), RepoError> {
        self.repo.rename(from, to).await
    }

    pub async fn read_html(&self, name: &str) -> Result<String, RepoError> {
        self.repo.read_html(name).await
    }
}
