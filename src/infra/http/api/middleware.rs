use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use metrics::counter;
use tracing::{error, warn};

use crate::application::api_keys::ApiAuthError;
use crate::application::error::ErrorReport;

use super::error::ApiError;
use super::state::ApiState;

pub const API_KEY_HEADER: &str = "apikey";

/// Reject the request with 403 unless it carries a known API key. The
/// accepted principal is stored in both request and response extensions.
pub async fn api_auth(
    State(state): State<ApiState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let key = extract_key(request.headers()).unwrap_or_default();

    let principal = match state.api_keys.authenticate(&key).await {
        Ok(principal) => principal,
        Err(err) => return reject(err),
    };

    request.extensions_mut().insert(principal.clone());
    let mut response = next.run(request).await;
    response.extensions_mut().insert(principal);
    response
}

fn reject(err: ApiAuthError) -> Response {
    counter!("scriptorium_auth_rejected_total").increment(1);
    match &err {
        ApiAuthError::Unavailable(source) => {
            error!(
                target = "scriptorium::auth",
                error = %source,
                "api key store could not be read"
            );
        }
        ApiAuthError::Missing | ApiAuthError::Invalid => {
            warn!(target = "scriptorium::auth", reason = %err, "api key rejected");
        }
    }

    let report = ErrorReport::from_error(
        "infra::http::api::middleware::api_auth",
        StatusCode::FORBIDDEN,
        &err,
    );
    ApiError::forbidden().with_report(report).into_response()
}

fn extract_key(headers: &HeaderMap) -> Option<String> {
    headers
        .get(API_KEY_HEADER)
        .and_then(header_text)
        .or_else(|| extract_bearer(headers.get(header::AUTHORIZATION)))
}

fn extract_bearer(header: Option<&HeaderValue>) -> Option<String> {
    let raw = header?.to_str().ok()?;
    let bearer = raw.strip_prefix("Bearer ")?;
    Some(bearer.to_string())
}

fn header_text(value: &HeaderValue) -> Option<String> {
    value.to_str().ok().map(|s| s.trim().to_string())
}
