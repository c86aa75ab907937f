use metrics::counter;
use tracing::{info, warn};

use crate::domain::posts::{
    PostInfo, PostPatch, find_by_name, position_by_name, post_link, validate_post_name,
};

use super::service::PostService;
use super::types::{GenerationError, PostError};

impl PostService {
    /// Register a new post and render its body. Returns the post link.
    ///
    /// The summary entry is persisted before the files are written. If writing
    /// or rendering fails the partial files are removed but the entry stays.
    pub async fn create_post(&self, info: PostInfo, body: &str) -> Result<String, PostError> {
        validate_post_name(&info.name)?;

        let _guard = self.gate.write().await;

        let mut entries = self.summary.load().await.map_err(PostError::Storage)?;
        if find_by_name(&entries, &info.name).is_some() {
            return Err(PostError::PostExists { name: info.name });
        }

        let name = info.name.clone();
        let entry = info.into_entry();
        let link = entry.link.clone();
        entries.push(entry.into());
        self.summary
            .save(&entries)
            .await
            .map_err(PostError::Storage)?;

        if let Err(source) = self.files.generate(&name, body).await {
            self.files.discard(&name).await;
            warn!(
                target = "scriptorium::posts",
                post = %name,
                error = %source,
                "post registered but markdown generation failed"
            );
            return Err(PostError::MarkdownGeneration { name, source });
        }

        counter!("scriptorium_posts_created_total").increment(1);
        info!(target = "scriptorium::posts", post = %name, "post created");
        Ok(link)
    }

    /// Merge `patch` into the post named `identifier`. A supplied `body`
    /// replaces the files under the merged name; otherwise a changed name
    /// renames them. Returns the post's current link.
    ///
    /// The merged summary is persisted first; later file failures do not
    /// revert it.
    pub async fn edit_post(
        &self,
        identifier: &str,
        patch: PostPatch,
        body: Option<&str>,
    ) -> Result<String, PostError> {
        if let Some(new_name) = patch.new_name.as_deref() {
            validate_post_name(new_name)?;
        }

        let _guard = self.gate.write().await;

        let mut entries = self.summary.load().await.map_err(PostError::Storage)?;
        let index =
            position_by_name(&entries, identifier).ok_or_else(|| PostError::PostDoesntExist {
                name: identifier.to_string(),
            })?;

        if let Some(new_name) = patch.new_name.as_deref()
            && new_name != identifier
            && position_by_name(&entries, new_name).is_some()
        {
            return Err(PostError::PostExists {
                name: new_name.to_string(),
            });
        }

        let entry = &mut entries[index];
        patch.apply_to(entry);
        let name = entry
            .name
            .clone()
            .unwrap_or_else(|| identifier.to_string());

        self.summary
            .save(&entries)
            .await
            .map_err(PostError::Storage)?;

        match body {
            Some(body) => self.replace_files(identifier, &name, body).await?,
            None if name != identifier => {
                self.files
                    .rename(identifier, &name)
                    .await
                    .map_err(PostError::Io)?;
            }
            None => {}
        }
        if name != identifier {
            info!(
                target = "scriptorium::posts",
                from = identifier,
                to = %name,
                "post renamed"
            );
        }

        counter!("scriptorium_posts_edited_total").increment(1);
        info!(
            target = "scriptorium::posts",
            post = %name,
            body_replaced = body.is_some(),
            "post edited"
        );
        Ok(post_link(&name))
    }

    /// Drop the files stored under `previous` and generate `name` from `body`.
    /// A rename combined with a new body needs no file rename, so a post
    /// whose earlier generation failed can be repaired here.
    async fn replace_files(&self, previous: &str, name: &str, body: &str) -> Result<(), PostError> {
        let generation_failed = |source: GenerationError| PostError::MarkdownGeneration {
            name: name.to_string(),
            source,
        };

        self.files
            .remove(previous)
            .await
            .map_err(|err| generation_failed(err.into()))?;
        if previous != name {
            self.files
                .remove(name)
                .await
                .map_err(|err| generation_failed(err.into()))?;
        }

        if let Err(source) = self.files.generate(name, body).await {
            self.files.discard(name).await;
            warn!(
                target = "scriptorium::posts",
                post = name,
                error = %source,
                "post edited but markdown regeneration failed"
            );
            return Err(generation_failed(source));
        }
        Ok(())
    }

    /// Drop the post from the summary, then delete its files.
    ///
    /// The summary goes first so that a failed file delete leaves orphan files
    /// rather than an entry pointing at nothing.
    pub async fn delete_post(&self, name: &str) -> Result<(), PostError> {
        let _guard = self.gate.write().await;

        let mut entries = self.summary.load().await.map_err(PostError::Storage)?;
        let index = position_by_name(&entries, name).ok_or_else(|| PostError::PostDoesntExist {
            name: name.to_string(),
        })?;

        entries.remove(index);
        self.summary
            .save(&entries)
            .await
            .map_err(PostError::Storage)?;

        self.files.remove(name).await.map_err(PostError::Io)?;

        counter!("scriptorium_posts_deleted_total").increment(1);
        info!(target = "scriptorium::posts", post = name, "post deleted");
        Ok(())
    }
}
