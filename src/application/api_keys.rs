use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::repos::{ApiKeysRepo, RepoError};
use crate::domain::api_keys::{API_KEY_ALPHABET, API_KEY_LENGTH, ApiKeyDigest};

const FINGERPRINT_LEN: usize = 12;
const MAX_ISSUE_ATTEMPTS: usize = 8;

/// Largest multiple of the alphabet size that fits in a byte.
const SAMPLE_LIMIT: usize = 256 - 256 % API_KEY_ALPHABET.len();

#[derive(Debug, Error)]
pub enum ApiKeyError {
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error("could not generate a unique key after {attempts} attempts")]
    Exhausted { attempts: usize },
}

#[derive(Debug, Error)]
pub enum ApiAuthError {
    #[error("missing api key")]
    Missing,
    #[error("invalid api key")]
    Invalid,
    #[error("api key store unavailable")]
    Unavailable(#[source] RepoError),
}

/// The caller behind an accepted key, identified by a digest prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPrincipal {
    pub fingerprint: String,
}

#[derive(Clone)]
pub struct ApiKeyService {
    repo: Arc<dyn ApiKeysRepo>,
}

impl ApiKeyService {
    pub fn new(repo: Arc<dyn ApiKeysRepo>) -> Self {
        Self { repo }
    }

    /// Accept `key` iff its digest is one of the stored digests.
    pub async fn authenticate(&self, key: &str) -> Result<ApiPrincipal, ApiAuthError> {
        if key.is_empty() {
            return Err(ApiAuthError::Missing);
        }

        let digests = self
            .repo
            .load_digests()
            .await
            .map_err(ApiAuthError::Unavailable)?;
        let candidate = ApiKeyDigest::of(key);

        // Scan every digest so timing does not depend on match position.
        let accepted = digests
            .iter()
            .fold(false, |found, stored| stored.matches(&candidate) | found);
        if !accepted {
            return Err(ApiAuthError::Invalid);
        }

        Ok(ApiPrincipal {
            fingerprint: candidate.as_str()[..FINGERPRINT_LEN].to_string(),
        })
    }

    /// Generate a new key, store its digest and return the plaintext. The
    /// plaintext is not recoverable afterwards.
    pub async fn issue(&self) -> Result<String, ApiKeyError> {
        let mut digests = self.repo.load_digests().await?;

        for _ in 0..MAX_ISSUE_ATTEMPTS {
            let key = generate_key();
            let digest = ApiKeyDigest::of(&key);
            if digests.iter().any(|stored| stored.matches(&digest)) {
                warn!(target = "scriptorium::auth", "generated key collided, retrying");
                continue;
            }

            let fingerprint = digest.as_str()[..FINGERPRINT_LEN].to_string();
            digests.push(digest);
            self.repo.save_digests(&digests).await?;
            info!(target = "scriptorium::auth", %fingerprint, "api key issued");
            return Ok(key);
        }

        Err(ApiKeyError::Exhausted {
            attempts: MAX_ISSUE_ATTEMPTS,
        })
    }
}

/// Draw [`API_KEY_LENGTH`] symbols uniformly from [`API_KEY_ALPHABET`].
pub fn generate_key() -> String {
    let mut key = String::with_capacity(API_KEY_LENGTH);
    while key.len() < API_KEY_LENGTH {
        let bytes = *Uuid::new_v4().as_bytes();
        // Bytes 6 and 8 carry the version and variant bits.
        for (index, byte) in bytes.into_iter().enumerate() {
            if index == 6 || index == 8 {
                continue;
            }
            let byte = usize::from(byte);
            if byte >= SAMPLE_LIMIT {
                continue;
            }
            key.push(char::from(API_KEY_ALPHABET[byte % API_KEY_ALPHABET.len()]));
            if key.len() == API_KEY_LENGTH {
                break;
            }
        }
    }
    key
}
