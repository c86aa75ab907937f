use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{application::posts::PostError, config::LoadError, infra::error::InfraError};

/// Diagnostic chain attached to error responses so the logging middleware can
/// report the cause without leaking it to clients.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub status: StatusCode,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, status: StatusCode, error: &dyn StdError) -> Self {
        let mut messages = Vec::new();
        messages.push(error.to_string());
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self {
            source,
            status,
            messages,
        }
    }

    pub fn from_message(
        source: &'static str,
        status: StatusCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source,
            status,
            messages: vec![message.into()],
        }
    }

    pub fn attach(self, response: &mut Response) {
        response.extensions_mut().insert(self);
    }
}

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    public_message: &'static str,
    report: ErrorReport,
}

impl HttpError {
    pub fn new(
        source: &'static str,
        status: StatusCode,
        public_message: &'static str,
        detail: impl Into<String>,
    ) -> Self {
        let report = ErrorReport::from_message(source, status, detail);
        Self {
            status,
            public_message,
            report,
        }
    }

    pub fn from_error(
        source: &'static str,
        status: StatusCode,
        public_message: &'static str,
        error: &dyn StdError,
    ) -> Self {
        let report = ErrorReport::from_error(source, status, error);
        Self {
            status,
            public_message,
            report,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn public_message(&self) -> &'static str {
        self.public_message
    }

    pub fn into_report(self) -> ErrorReport {
        self.report
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.public_message).into_response();
        self.report.attach(&mut response);
        response
    }
}

impl From<PostError> for HttpError {
    fn from(error: PostError) -> Self {
        const SOURCE: &str = "application::error::post_error_to_http_error";
        let status = error.status_code();
        let public_message = match &error {
            PostError::PostExists { .. } => "Post already exists",
            PostError::PostDoesntExist { .. } | PostError::ContentMissing { .. } => {
                "Post not found"
            }
            PostError::Validation(_) => "Request could not be processed",
            PostError::MarkdownGeneration { .. } => "Markdown generation failed",
            PostError::Incomplete { .. } | PostError::Storage(_) | PostError::Io(_) => {
                "Internal server error"
            }
        };
        HttpError::from_error(SOURCE, status, public_message, &error)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("outer")]
    struct Outer(#[source] Inner);

    #[derive(Debug, Error)]
    #[error("inner")]
    struct Inner;

    #[test]
    fn report_collects_source_chain() {
        let report = ErrorReport::from_error("test", StatusCode::INTERNAL_SERVER_ERROR, &Outer(Inner));
        assert_eq!(report.messages, ["outer", "inner"]);
    }

    #[test]
    fn post_errors_map_to_distinct_statuses() {
        let exists: HttpError = PostError::PostExists {
            name: "hello".into(),
        }
        .into();
        assert_eq!(exists.status(), StatusCode::CONFLICT);

        let missing: HttpError = PostError::PostDoesntExist {
            name: "hello".into(),
        }
        .into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.public_message(), "Post not found");
    }

    #[test]
    fn configuration_failures_keep_the_offending_key() {
        let error = AppError::from(LoadError::Invalid {
            key: "server.port",
            reason: "port must be greater than zero".to_string(),
        });
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(
            error.to_string(),
            "failed to load configuration: invalid configuration for `server.port`: \
             port must be greater than zero"
        );
    }
}
