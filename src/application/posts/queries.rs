use tracing::error;

use crate::domain::posts::{PostSummaryEntry, SummaryRecord, filter_by_tag, find_by_name};

use super::service::PostService;
use super::types::{PostError, RenderedPost};

impl PostService {
    /// Displayable summary entries in stored order, optionally restricted to
    /// those carrying `tag`. Entries missing a field are logged and skipped.
    pub async fn list_posts(&self, tag: Option<&str>) -> Result<Vec<PostSummaryEntry>, PostError> {
        let _guard = self.gate.read().await;
        let entries = self.summary.load().await.map_err(PostError::Storage)?;

        let selected: Vec<&SummaryRecord> = match tag {
            Some(tag) => filter_by_tag(&entries, tag),
            None => entries.iter().collect(),
        };

        Ok(selected
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match PostSummaryEntry::try_from(record) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    error!(
                        target = "scriptorium::posts",
                        index,
                        post = record.name().unwrap_or("<unnamed>"),
                        error = %err,
                        "skipping incomplete summary entry"
                    );
                    None
                }
            })
            .collect())
    }

    /// Summary entry and rendered HTML of the post named `name`.
    pub async fn fetch_post(&self, name: &str) -> Result<RenderedPost, PostError> {
        let _guard = self.gate.read().await;
        let entries = self.summary.load().await.map_err(PostError::Storage)?;

        let record = find_by_name(&entries, name).ok_or_else(|| PostError::PostDoesntExist {
            name: name.to_string(),
        })?;
        let entry = PostSummaryEntry::try_from(record).map_err(|source| PostError::Incomplete {
            name: name.to_string(),
            source,
        })?;

        let html = self
            .files
            .read_html(name)
            .await
            .map_err(PostError::file_failure)?;

        Ok(RenderedPost { entry, html })
    }
}
