use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::repos::{ApiKeysRepo, RepoError};
use crate::domain::api_keys::ApiKeyDigest;

use super::{read_json_or_default, write_json_atomic};

/// API key digests stored as a JSON array of hex strings.
#[derive(Debug, Clone)]
pub struct JsonApiKeyStore {
    path: PathBuf,
}

impl JsonApiKeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ApiKeysRepo for JsonApiKeyStore {
    async fn load_digests(&self) -> Result<Vec<ApiKeyDigest>, RepoError> {
        read_json_or_default(&self.path).await
    }

    async fn save_digests(&self, digests: &[ApiKeyDigest]) -> Result<(), RepoError> {
        write_json_atomic(&self.path, digests).await
    }
}
