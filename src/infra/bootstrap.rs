//! Wiring from resolved settings to the services behind the router.

use std::sync::Arc;

use crate::application::api_keys::ApiKeyService;
use crate::application::posts::{PostFileManager, PostService};
use crate::application::render::{ComrakRenderService, RenderOptions, RenderService};
use crate::config::Settings;
use crate::presentation::views::SiteChrome;

use super::http::{ApiState, HttpState, RouterState};
use super::storage::{FsPostFiles, JsonApiKeyStore, JsonSummaryStore};

/// Build the router state with the comrak renderer configured by `settings`.
pub fn build_router_state(settings: &Settings) -> RouterState {
    let renderer = Arc::new(ComrakRenderService::new(RenderOptions::from(
        &settings.render,
    )));
    build_router_state_with_renderer(settings, renderer)
}

pub fn build_router_state_with_renderer(
    settings: &Settings,
    renderer: Arc<dyn RenderService>,
) -> RouterState {
    let summary = Arc::new(JsonSummaryStore::new(&settings.storage.summary_path));
    let files = Arc::new(FsPostFiles::new(&settings.storage.content_dir));
    let posts = Arc::new(PostService::new(
        summary,
        PostFileManager::new(files, renderer),
    ));
    let api_keys = Arc::new(build_api_key_service(settings));

    RouterState {
        http: HttpState {
            posts: posts.clone(),
            chrome: SiteChrome {
                title: settings.site.title.clone(),
            },
        },
        api: ApiState { api_keys, posts },
    }
}

pub fn build_api_key_service(settings: &Settings) -> ApiKeyService {
    ApiKeyService::new(Arc::new(JsonApiKeyStore::new(
        &settings.storage.key_digests_path,
    )))
}
