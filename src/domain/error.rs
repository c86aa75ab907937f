use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("domain validation failed: {message}")]
    Validation { message: String },
    #[error("required field `{field}` is missing")]
    MissingField { field: &'static str },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}
