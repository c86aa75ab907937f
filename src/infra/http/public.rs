use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::Response,
    routing::get,
};

use crate::{
    application::{
        error::HttpError,
        posts::{PostError, PostService},
    },
    presentation::views::{
        HomeTemplate, HomeView, LayoutContext, OverviewTemplate, OverviewView, PostCard,
        PostDetailView, PostTemplate, SiteChrome, render_error_response,
        render_not_found_response, render_template_response,
    },
};

use super::{
    RouterState,
    middleware::{log_responses, set_request_context},
};

const HOME_LATEST_LIMIT: usize = 5;

#[derive(Clone)]
pub struct HttpState {
    pub posts: Arc<PostService>,
    pub chrome: SiteChrome,
}

pub fn build_router(state: RouterState) -> Router<RouterState> {
    Router::new()
        .route("/", get(index))
        .route("/blog", get(blog_overview))
        .route("/blog/tagged/{tag}", get(tagged_overview))
        .route("/blog/posts/{postname}", get(post_detail))
        .route("/_health", get(health))
        .route("/static/{*path}", get(crate::infra::assets::serve_static))
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn index(State(state): State<HttpState>) -> Response {
    match state.posts.list_posts(None).await {
        Ok(entries) => {
            let latest = entries
                .into_iter()
                .rev()
                .take(HOME_LATEST_LIMIT)
                .map(PostCard::from)
                .collect();
            let view = LayoutContext::new(state.chrome, HomeView { latest });
            render_template_response(HomeTemplate { view }, StatusCode::OK)
        }
        Err(err) => post_error_response(state.chrome, err),
    }
}

async fn blog_overview(State(state): State<HttpState>) -> Response {
    render_overview(state, "All posts".to_string(), None).await
}

async fn tagged_overview(State(state): State<HttpState>, Path(tag): Path<String>) -> Response {
    let heading = format!("Posts tagged “{tag}”");
    render_overview(state, heading, Some(&tag)).await
}

async fn render_overview(state: HttpState, heading: String, tag: Option<&str>) -> Response {
    match state.posts.list_posts(tag).await {
        Ok(entries) => {
            let view = LayoutContext::new(state.chrome, OverviewView::new(heading, entries));
            render_template_response(OverviewTemplate { view }, StatusCode::OK)
        }
        Err(err) => post_error_response(state.chrome, err),
    }
}

async fn post_detail(State(state): State<HttpState>, Path(postname): Path<String>) -> Response {
    match state.posts.fetch_post(&postname).await {
        Ok(post) => {
            let view = LayoutContext::new(state.chrome, PostDetailView::new(post.entry, post.html));
            render_template_response(PostTemplate { view }, StatusCode::OK)
        }
        Err(err) => {
            if let PostError::ContentMissing { name } = &err {
                tracing::error!(
                    target = "scriptorium::posts",
                    post = %name,
                    "summary lists a post whose html file is missing"
                );
            }
            post_error_response(state.chrome, err)
        }
    }
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn fallback(State(state): State<HttpState>) -> Response {
    render_not_found_response(state.chrome)
}

fn post_error_response(chrome: SiteChrome, err: PostError) -> Response {
    render_error_response(chrome, HttpError::from(err))
}
