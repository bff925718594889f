//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for GreenCity email
//! verification. It provides concrete implementations of the core contracts
//! and the process-level plumbing around them.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL token store and user directory using SQLx
//! - **Memory**: In-process token store and user directory
//! - **Mail**: SMTP delivery through lettre and a logging mailer
//! - **Config / Logging**: Configuration loading and tracing setup
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use std::sync::Arc;

// Re-export core types for convenience
pub use gc_core::errors::*;

use gc_core::repositories::{TokenStore, UserDirectory};
use gc_core::services::verification::{
    Mailer, SystemClock, VerificationService, VerificationServiceConfig,
};
use gc_shared::AppConfig;

/// Configuration loading
pub mod config;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Tracing subscriber setup
pub mod logging;

/// Mail module - outbound email transports
pub mod mail;

/// In-memory adapters for development and tests
pub mod memory;

/// Build a ready-to-use verification service from configuration
///
/// Selects the mailer from `config.mail` and uses the wall clock.
pub fn build_verification_service<T, U>(
    config: &AppConfig,
    store: Arc<T>,
    users: Arc<U>,
) -> Result<VerificationService<T, U, dyn Mailer>, InfrastructureError>
where
    T: TokenStore,
    U: UserDirectory,
{
    let mailer = mail::create_mailer(&config.mail);
    tracing::info!(
        provider = mailer.provider_name(),
        ttl_hours = config.verification.verify_email_time_hour,
        "Building verification service"
    );

    let service = VerificationService::new(
        store,
        users,
        mailer,
        Arc::new(SystemClock),
        VerificationServiceConfig::try_from(&config.verification)?,
    )?;
    Ok(service)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// SMTP transport error
    #[error("Mail transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration source could not be read or deserialized
    #[error("Configuration source error: {0}")]
    Settings(#[from] ::config::ConfigError),

    /// Mail service error
    #[error("Mail service error: {0}")]
    Mail(String),

    /// Error raised by the domain layer while wiring services
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Domain(inner) => inner,
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
