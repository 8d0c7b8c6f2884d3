//! Error types for the checkout flow.

use crate::validation::ValidationErrors;

/// Domain-level errors (malformed payloads, rejected models).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid value for {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
}

impl DomainError {
    pub fn invalid_field(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            value: value.into(),
        }
    }
}

/// Application-level errors returned by the checkout service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Signature does not match the checkout id and amount")]
    InvalidSignature,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(errors) => AppError::Validation(errors),
            e @ DomainError::InvalidField { .. } => AppError::BadRequest(e.to_string()),
        }
    }
}
