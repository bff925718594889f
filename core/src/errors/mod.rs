//! Domain-specific error types and error handling.

mod types;


// Re-export all error types
pub use types::{MailError, VerificationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl DomainError {
    /// Stable, machine-readable code for the error
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Verification(e) => e.error_code(),
        }
    }

    /// Whether the failure was caused by the caller's input rather than the server
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DomainError::Internal { .. })
    }

    /// Shorthand for an [`DomainError::Internal`] with a formatted message
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
