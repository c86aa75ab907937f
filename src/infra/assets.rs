//! Embedded static asset serving utilities.

use axum::{
    body::Body,
    extract::Path,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use include_dir::{Dir, include_dir};
use mime_guess::{Mime, MimeGuess};

use crate::application::error::ErrorReport;

static STATIC_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static");

const SOURCE: &str = "infra::assets::serve_static";

/// Serve an embedded asset from the `static/` bundle.
pub async fn serve_static(Path(path): Path<String>) -> Response {
    match resolve_asset(&STATIC_ASSETS, &path) {
        Some(asset) => asset.into_response(),
        None => not_found_response(SOURCE),
    }
}

fn not_found_response(source: &'static str) -> Response {
    let mut response = StatusCode::NOT_FOUND.into_response();
    ErrorReport::from_message(source, StatusCode::NOT_FOUND, "Static asset not found")
        .attach(&mut response);
    response
}

struct Asset {
    contents: &'static [u8],
    mime: MimeGuess,
}

fn resolve_asset(bundle: &'static Dir<'static>, path: &str) -> Option<Asset> {
    let candidate = path.trim_start_matches('/');
    if candidate.is_empty() || candidate.ends_with('/') || candidate.contains("..") {
        return None;
    }

    let file = bundle.get_file(candidate)?;
    Some(Asset {
        contents: file.contents(),
        mime: mime_guess::from_path(candidate),
    })
}

impl IntoResponse for Asset {
    fn into_response(self) -> Response {
        let mime = self.mime.first_or_octet_stream();
        build_response(Bytes::from_static(self.contents), mime)
    }
}

fn build_response(bytes: Bytes, mime: Mime) -> Response {
    let len = bytes.len();
    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = StatusCode::OK;

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&len.to_string()) {
        headers.insert(header::CONTENT_LENGTH, value);
    }
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=3600"),
    );

    response
}
