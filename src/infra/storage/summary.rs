use std::path::PathBuf;

use async_trait::async_trait;

use crate::application::repos::{RepoError, SummaryRepo};
use crate::domain::posts::SummaryRecord;

use super::{read_json_or_default, write_json_atomic};

/// The summary index stored as one JSON array.
#[derive(Debug, Clone)]
pub struct JsonSummaryStore {
    path: PathBuf,
}

impl JsonSummaryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SummaryRepo for JsonSummaryStore {
    async fn load(&self) -> Result<Vec<SummaryRecord>, RepoError> {
        read_json_or_default(&self.path).await
    }

    async fn save(&self, entries: &[SummaryRecord]) -> Result<(), RepoError> {
        write_json_atomic(&self.path, entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn partial_rows_survive_a_load_save_cycle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("summary.json");
        std::fs::write(&path, r#"[{"name":"a","title":"A"},{"name":"b"}]"#).expect("seed");

        let store = JsonSummaryStore::new(&path);
        let entries = store.load().await.expect("load");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title.as_deref(), Some("A"));
        assert!(entries[1].title.is_none());

        store.save(&entries).await.expect("save");
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(raw, serde_json::json!([{"name":"a","title":"A"},{"name":"b"}]));
    }
}
