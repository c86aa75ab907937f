//! Filesystem-backed repositories: the summary index, the post file pairs and
//! the API key digest store.

mod files;
mod keys;
mod summary;

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;

use crate::application::repos::RepoError;

pub use files::FsPostFiles;
pub use keys::JsonApiKeyStore;
pub use summary::JsonSummaryStore;

/// Read and decode a JSON document. A file that does not exist yet decodes as
/// `T::default()`.
async fn read_json_or_default<T>(path: &Path) -> Result<T, RepoError>
where
    T: DeserializeOwned + Default,
{
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(err) => return Err(RepoError::io(path, err)),
    };
    serde_json::from_slice(&bytes).map_err(|err| RepoError::malformed(path, err))
}

/// Replace the document at `path` with `value`.
///
/// The bytes go to a sibling temporary file that is renamed over `path`, so
/// readers see either the old or the new document.
async fn write_json_atomic<T>(path: &Path, value: &T) -> Result<(), RepoError>
where
    T: Serialize + ?Sized,
{
    let mut bytes = serde_json::to_vec_pretty(value).map_err(|err| RepoError::malformed(path, err))?;
    bytes.push(b'\n');

    let target = path.to_path_buf();
    let outcome = tokio::task::spawn_blocking(move || persist_bytes(&target, &bytes)).await;
    match outcome {
        Ok(result) => result.map_err(|err| RepoError::io(path, err)),
        Err(join) => Err(RepoError::io(path, std::io::Error::other(join))),
    }
}

fn persist_bytes(target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let parent = parent_dir(target);
    std::fs::create_dir_all(&parent)?;

    let mut file = tempfile::NamedTempFile::new_in(&parent)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(target).map_err(|err| err.error)?;
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
