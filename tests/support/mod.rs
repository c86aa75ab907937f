#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use scriptorium::application::posts::{PostFileManager, PostService};
use scriptorium::application::render::{ComrakRenderService, RenderError, RenderService};
use scriptorium::config::{
    LogFormat, LoggingSettings, RenderSettings, ServerSettings, Settings, SiteSettings,
    StorageSettings,
};
use scriptorium::domain::posts::{PostInfo, SummaryRecord};
use scriptorium::infra::storage::{FsPostFiles, JsonSummaryStore};
use tempfile::TempDir;
use tracing::level_filters::LevelFilter;

/// Renderer that always fails, for exercising the generation failure path.
pub struct FailingRenderer;

impl RenderService for FailingRenderer {
    fn render(&self, _markdown: &str) -> Result<String, RenderError> {
        Err(RenderError::Markdown {
            message: "renderer unavailable".to_string(),
        })
    }
}

pub struct Blog {
    pub dir: TempDir,
    pub service: PostService,
}

impl Blog {
    pub fn new() -> Self {
        Self::with_renderer(Arc::new(ComrakRenderService::default()))
    }

    pub fn with_renderer(renderer: Arc<dyn RenderService>) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let summary = Arc::new(JsonSummaryStore::new(summary_path(dir.path())));
        let files = Arc::new(FsPostFiles::new(content_dir(dir.path())));
        let service = PostService::new(summary, PostFileManager::new(files, renderer));
        Self { dir, service }
    }

    /// A second service over the same files, rendering with `renderer`.
    pub fn service_with_renderer(&self, renderer: Arc<dyn RenderService>) -> PostService {
        let summary = Arc::new(JsonSummaryStore::new(summary_path(self.dir.path())));
        let files = Arc::new(FsPostFiles::new(content_dir(self.dir.path())));
        PostService::new(summary, PostFileManager::new(files, renderer))
    }

    pub fn content_file(&self, file: &str) -> PathBuf {
        content_dir(self.dir.path()).join(file)
    }

    pub fn summary(&self) -> Vec<SummaryRecord> {
        read_summary(self.dir.path())
    }
}

pub fn content_dir(root: &Path) -> PathBuf {
    root.join("web/blogposts")
}

pub fn summary_path(root: &Path) -> PathBuf {
    root.join("web/blogposts/summary.json")
}

pub fn read_summary(root: &Path) -> Vec<SummaryRecord> {
    let raw = std::fs::read_to_string(summary_path(root)).expect("summary file");
    serde_json::from_str(&raw).expect("summary json")
}

pub fn post_info(name: &str, tags: &[&str]) -> PostInfo {
    PostInfo {
        name: name.to_string(),
        image_src: "/static/cover.png".to_string(),
        title: format!("Title of {name}"),
        author: "Ada".to_string(),
        date: "2024-05-01".to_string(),
        description: format!("About {name}"),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    }
}

pub fn settings(root: &Path) -> Settings {
    Settings {
        server: ServerSettings {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            graceful_shutdown: Duration::from_secs(1),
            max_body_bytes: 64 * 1024,
        },
        logging: LoggingSettings {
            level: LevelFilter::OFF,
            format: LogFormat::Compact,
        },
        storage: StorageSettings {
            content_dir: content_dir(root),
            summary_path: summary_path(root),
            key_digests_path: root.join("auth/keyhashes.json"),
        },
        render: RenderSettings {
            sanitize_html: false,
        },
        site: SiteSettings {
            title: "Test Blog".to_string(),
        },
    }
}
