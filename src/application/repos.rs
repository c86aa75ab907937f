//! Repository traits describing persistence adapters.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::api_keys::ApiKeyDigest;
use crate::domain::posts::SummaryRecord;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("i/o failure on `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed document `{path}`")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("stored content for `{name}` not found")]
    MissingContent { name: String },
    #[error("`{name}` is not a valid storage key")]
    InvalidKey { name: String },
}

impl RepoError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Malformed {
            path: path.into(),
            source,
        }
    }
}

/// Persisted summary index. Reads and writes always cover the whole collection.
#[async_trait]
pub trait SummaryRepo: Send + Sync {
    /// Load every record; an index that was never written loads as empty.
    async fn load(&self) -> Result<Vec<SummaryRecord>, RepoError>;

    /// Replace the persisted collection with `entries`.
    async fn save(&self, entries: &[SummaryRecord]) -> Result<(), RepoError>;
}

/// Markdown source and rendered HTML, one pair per post name.
#[async_trait]
pub trait PostFilesRepo: Send + Sync {
    async fn write_markdown(&self, name: &str, body: &str) -> Result<(), RepoError>;

    async fn read_markdown(&self, name: &str) -> Result<String, RepoError>;

    async fn write_html(&self, name: &str, html: &str) -> Result<(), RepoError>;

    /// Fails with [`RepoError::MissingContent`] when no HTML exists for `name`.
    async fn read_html(&self, name: &str) -> Result<String, RepoError>;

    /// Delete both files; files that do not exist are skipped.
    async fn remove(&self, name: &str) -> Result<(), RepoError>;

    /// Rename both files. A failure on the second rename leaves the first in place.
    async fn rename(&self, from: &str, to: &str) -> Result<(), RepoError>;
}

/// Stored API key digests.
#[async_trait]
pub trait ApiKeysRepo: Send + Sync {
    /// Load every digest; a store that was never written loads as empty.
    async fn load_digests(&self) -> Result<Vec<ApiKeyDigest>, RepoError>;

    async fn save_digests(&self, digests: &[ApiKeyDigest]) -> Result<(), RepoError>;
}
