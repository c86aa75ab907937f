pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

pub use state::ApiState;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, patch, post},
};

use crate::infra::http::RouterState;
use crate::infra::http::middleware::{log_responses, set_request_context};

pub fn build_api_router(state: RouterState) -> Router<RouterState> {
    let auth_state = state.clone();

    Router::new()
        .route("/blog/createPost", post(handlers::create_post))
        .route("/blog/editPost", patch(handlers::edit_post))
        .route("/blog/removePost", delete(handlers::remove_post))
        .with_state(state)
        .layer(axum_middleware::from_fn_with_state(
            auth_state,
            middleware::api_auth,
        ))
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}
