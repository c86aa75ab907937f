//! Domain types for API keys and their stored digests.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;

/// Number of symbols in a generated key.
pub const API_KEY_LENGTH: usize = 64;

/// Symbols a generated key is drawn from.
pub const API_KEY_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!#$%&*+-/?@<>=_~";

/// Lowercase hex SHA-512 digest of an API key. The plaintext is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeyDigest(String);

impl ApiKeyDigest {
    pub fn of(key: &str) -> Self {
        let mut hasher = Sha512::new();
        hasher.update(key.as_bytes());
        Self(hex::encode(hasher.finalize().to_vec()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare digests without short-circuiting on the first differing byte.
    pub fn matches(&self, other: &ApiKeyDigest) -> bool {
        let left = self.0.as_bytes();
        let right = other.0.as_bytes();
        left.len() == right.len() && left.ct_eq(right).unwrap_u8() == 1
    }
}

impl Display for ApiKeyDigest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_lowercase_hex_sha512() {
        let digest = ApiKeyDigest::of("secret");
        assert_eq!(digest.as_str().len(), 128);
        assert!(
            digest
                .as_str()
                .chars()
                .all(|ch| ch.is_ascii_digit() || ('a'..='f').contains(&ch))
        );
        assert_eq!(digest, ApiKeyDigest::of("secret"));
    }

    #[test]
    fn matches_only_identical_digests() {
        let digest = ApiKeyDigest::of("secret");
        assert!(digest.matches(&ApiKeyDigest::of("secret")));
        assert!(!digest.matches(&ApiKeyDigest::of("Secret")));
    }

    #[test]
    fn alphabet_has_no_duplicates() {
        let mut symbols = API_KEY_ALPHABET.to_vec();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), API_KEY_ALPHABET.len());
        assert_eq!(API_KEY_ALPHABET.len(), 78);
    }
}
