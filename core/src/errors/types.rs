//! Error types for the email verification lifecycle and mail delivery

use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Failures raised deliberately at the verification service boundary
///
/// `TokenNotFound` and `TokenExpired` are kept apart so callers can offer
/// different recovery actions (register again vs. resend the email).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("No email is awaiting verification for this token")]
    TokenNotFound,

    #[error("Email verification token expired at {expired_at}")]
    TokenExpired { expired_at: DateTime<Utc> },

    #[error("No verification record to delete with id {id}")]
    RecordNotFound { id: Uuid },

    #[error("User {user_id} has already verified their email")]
    AlreadyVerified { user_id: Uuid },
}

impl VerificationError {
    /// Stable, machine-readable code for the error
    pub fn error_code(&self) -> &'static str {
        match self {
            VerificationError::TokenNotFound => "TOKEN_NOT_FOUND",
            VerificationError::TokenExpired { .. } => "TOKEN_EXPIRED",
            VerificationError::RecordNotFound { .. } => "RECORD_NOT_FOUND",
            VerificationError::AlreadyVerified { .. } => "ALREADY_VERIFIED",
        }
    }
}

/// Mail transport failures
///
/// These never reach the issuing caller; they are logged by the delivery task.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MailError {
    #[error("Invalid recipient address: {address}")]
    InvalidAddress { address: String },

    #[error("Failed to build message: {message}")]
    Message { message: String },

    #[error("Mail transport failure: {message}")]
    Transport { message: String },

    #[error("Mail delivery timed out after {0:?}")]
    Timeout(Duration),
}
