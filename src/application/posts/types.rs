use axum::http::StatusCode;
use thiserror::Error;

use crate::application::render::RenderError;
use crate::application::repos::RepoError;
use crate::domain::error::DomainError;
use crate::domain::posts::PostSummaryEntry;

/// Failures of the write-then-render step.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Files(#[from] RepoError),
}

#[derive(Debug, Error)]
pub enum PostError {
    #[error("post `{name}` already exists")]
    PostExists { name: String },
    #[error("post `{name}` does not exist")]
    PostDoesntExist { name: String },
    #[error("markdown generation failed for `{name}`")]
    MarkdownGeneration {
        name: String,
        #[source]
        source: GenerationError,
    },
    #[error("rendered content for `{name}` is missing")]
    ContentMissing { name: String },
    #[error("summary entry for `{name}` is incomplete")]
    Incomplete {
        name: String,
        #[source]
        source: DomainError,
    },
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error("summary storage failed")]
    Storage(#[source] RepoError),
    #[error("post file operation failed")]
    Io(#[source] RepoError),
}

impl PostError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PostError::PostExists { .. } => StatusCode::CONFLICT,
            PostError::PostDoesntExist { .. } | PostError::ContentMissing { .. } => {
                StatusCode::NOT_FOUND
            }
            PostError::Validation(_) => StatusCode::BAD_REQUEST,
            PostError::MarkdownGeneration { .. }
            | PostError::Incomplete { .. }
            | PostError::Storage(_)
            | PostError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub(crate) fn file_failure(err: RepoError) -> Self {
        match err {
            RepoError::MissingContent { name } => PostError::ContentMissing { name },
            other => PostError::Io(other),
        }
    }
}

/// A post ready for display: its summary entry and rendered body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPost {
    pub entry: PostSummaryEntry,
    pub html: String,
}
