use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scriptorium_api_types::{ApiErrorBody, ApiErrorMessage};

use crate::application::error::ErrorReport;
use crate::application::posts::PostError;

pub mod codes {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const AUTHENTICATION: &str = "authentication_failed";
    pub const POST_EXISTS: &str = "post_exists";
    pub const POST_NOT_FOUND: &str = "post_not_found";
    pub const MARKDOWN_GENERATION: &str = "markdown_generation_failed";
    pub const STORAGE: &str = "storage_error";
    pub const IO: &str = "io_error";
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
    hint: Option<String>,
    report: Option<ErrorReport>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: &'static str,
        hint: Option<String>,
    ) -> Self {
        Self {
            status,
            code,
            message,
            hint,
            report: None,
        }
    }

    pub fn bad_request(message: &'static str, hint: Option<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::BAD_REQUEST, message, hint)
    }

    /// Missing and wrong keys are indistinguishable to the client.
    pub fn forbidden() -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            codes::AUTHENTICATION,
            "A valid API key is required",
            None,
        )
    }

    pub fn missing_field(field: &'static str) -> Self {
        Self::bad_request(
            "Missing required query parameter",
            Some(format!("`{field}` is required")),
        )
    }

    pub(crate) fn with_report(mut self, report: ErrorReport) -> Self {
        self.report = Some(report);
        self
    }
}

impl From<PostError> for ApiError {
    fn from(err: PostError) -> Self {
        let status = err.status_code();
        let (code, message, hint) = match &err {
            PostError::PostExists { name } => (
                codes::POST_EXISTS,
                "Post already exists",
                Some(format!("a post named `{name}` already exists")),
            ),
            PostError::PostDoesntExist { name } | PostError::ContentMissing { name } => (
                codes::POST_NOT_FOUND,
                "Post does not exist",
                Some(format!("no post named `{name}`")),
            ),
            PostError::Validation(inner) => {
                (codes::BAD_REQUEST, "Invalid request", Some(inner.to_string()))
            }
            PostError::MarkdownGeneration { name, .. } => (
                codes::MARKDOWN_GENERATION,
                "Markdown generation failed",
                Some(format!("post `{name}` could not be rendered")),
            ),
            PostError::Incomplete { .. } | PostError::Storage(_) => {
                (codes::STORAGE, "Summary storage failed", None)
            }
            PostError::Io(_) => (codes::IO, "Post file operation failed", None),
        };
        let report = ErrorReport::from_error("infra::http::api::posts", status, &err);
        ApiError::new(status, code, message, hint).with_report(report)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let report = self.report.unwrap_or_else(|| {
            ErrorReport::from_message(
                "infra::http::api",
                self.status,
                format!(
                    "{}: {}",
                    self.code,
                    self.hint.as_deref().unwrap_or(self.message)
                ),
            )
        });
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: self.code.to_string(),
                message: self.message.to_string(),
                hint: self.hint,
            },
        };
        let mut response = (self.status, Json(body)).into_response();
        report.attach(&mut response);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_errors_keep_lifecycle_statuses() {
        let cases = [
            (
                PostError::PostExists { name: "a".into() },
                StatusCode::CONFLICT,
                codes::POST_EXISTS,
            ),
            (
                PostError::PostDoesntExist { name: "a".into() },
                StatusCode::NOT_FOUND,
                codes::POST_NOT_FOUND,
            ),
        ];

        for (err, status, code) in cases {
            let api = ApiError::from(err);
            assert_eq!(api.status, status);
            assert_eq!(api.code, code);
            assert!(api.report.is_some());
        }
    }

    #[test]
    fn forbidden_response_has_no_hint() {
        let response = ApiError::forbidden().into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response.extensions().get::<ErrorReport>().is_some());
    }
}
