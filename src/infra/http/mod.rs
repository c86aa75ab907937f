pub mod api;
mod middleware;
mod public;

pub use api::{ApiState, build_api_router};
pub use public::{HttpState, build_router};

use axum::Router;
use axum::extract::{DefaultBodyLimit, FromRef};

#[derive(Clone)]
pub struct RouterState {
    pub http: HttpState,
    pub api: ApiState,
}

impl FromRef<RouterState> for HttpState {
    fn from_ref(state: &RouterState) -> Self {
        state.http.clone()
    }
}

impl FromRef<RouterState> for ApiState {
    fn from_ref(state: &RouterState) -> Self {
        state.api.clone()
    }
}

/// Public pages and the mutation API on one router, with request bodies
/// capped at `max_body_bytes`.
pub fn build_app(state: RouterState, max_body_bytes: usize) -> Router {
    build_router(state.clone())
        .merge(build_api_router(state.clone()))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
