use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::repos::{PostFilesRepo, RepoError};
use crate::domain::posts::validate_post_name;

const MARKDOWN_EXT: &str = "md";
const HTML_EXT: &str = "html";

/// `<name>.md` and `<name>.html` side by side in one content directory.
#[derive(Debug, Clone)]
pub struct FsPostFiles {
    root: PathBuf,
}

impl FsPostFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, name: &str, ext: &str) -> Result<PathBuf, RepoError> {
        validate_post_name(name).map_err(|_| RepoError::InvalidKey {
            name: name.to_string(),
        })?;
        Ok(self.root.join(format!("{name}.{ext}")))
    }

    async fn write(&self, name: &str, ext: &str, contents: &str) -> Result<(), RepoError> {
        let path = self.resolve(name, ext)?;
        fs::create_dir_all(&self.root)
            .await
            .map_err(|err| RepoError::io(&self.root, err))?;
        fs::write(&path, contents)
            .await
            .map_err(|err| RepoError::io(&path, err))
    }

    async fn read(&self, name: &str, ext: &str) -> Result<String, RepoError> {
        let path = self.resolve(name, ext)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(contents),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(RepoError::MissingContent {
                name: name.to_string(),
            }),
            Err(err) => Err(RepoError::io(&path, err)),
        }
    }

    async fn remove_one(&self, name: &str, ext: &str) -> Result<(), RepoError> {
        let path = self.resolve(name, ext)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(RepoError::io(&path, err)),
        }
    }

    async fn rename_one(&self, from: &str, to: &str, ext: &str) -> Result<(), RepoError> {
        let source = self.resolve(from, ext)?;
        let target = self.resolve(to, ext)?;
        fs::rename(&source, &target)
            .await
            .map_err(|err| RepoError::io(&source, err))
    }
}

#[async_trait]
impl PostFilesRepo for FsPostFiles {
    async fn write_markdown(&self, name: &str, body: &str) -> Result<(), RepoError> {
        self.write(name, MARKDOWN_EXT, body).await
    }

    async fn read_markdown(&self, name: &str) -> Result<String, RepoError> {
        self.read(name, MARKDOWN_EXT).await
    }

    async fn write_html(&self, name: &str, html: &str) -> Result<(), RepoError> {
        self.write(name, HTML_EXT, html).await
    }

    async fn read_html(&self, name: &str) -> Result<String, RepoError> {
        self.read(name, HTML_EXT).await
    }

    async fn remove(&self, name: &str) -> Result<(), RepoError> {
        self.remove_one(name, MARKDOWN_EXT).await?;
        self.remove_one(name, HTML_EXT).await
    }

    async fn rename(&self, from: &str, to: &str) -> Result<(), RepoError> {
        self.rename_one(from, to, MARKDOWN_EXT).await?;
        self.rename_one(from, to, HTML_EXT).await
    }
}
