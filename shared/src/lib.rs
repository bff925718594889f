//! Shared utilities and common types for the GreenCity server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Email address utilities (validation, log masking)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CleanupConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig, MailConfig,
    MailProvider, VerificationConfig,
};
pub use utils::email;
