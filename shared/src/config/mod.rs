//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `mail` - Outbound email transport configuration
//! - `verification` - Email verification token lifecycle configuration

pub mod database;
pub mod environment;
pub mod mail;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::{MailConfig, MailProvider};
pub use verification::{CleanupConfig, VerificationConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Email verification configuration
    pub verification: VerificationConfig,

    /// Outbound mail configuration
    #[serde(default)]
    pub mail: MailConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            verification: VerificationConfig::default(),
            mail: MailConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            verification: VerificationConfig::default(),
            mail: MailConfig::default(),
            database: DatabaseConfig::new("mysql://localhost:3306/greencity_dev"),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            verification: VerificationConfig::default(),
            mail: MailConfig {
                provider: MailProvider::Smtp,
                ..Default::default()
            },
            database: DatabaseConfig::new("mysql://prod-db:3306/greencity").with_max_connections(50),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment
    ///
    /// Starts from the preset matching `ENVIRONMENT` and overlays the
    /// individual `from_env` loaders.
    pub fn from_env() -> Self {
        let env = Environment::from_env();
        let mut config = match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        };

        config.verification = VerificationConfig::from_env();
        config.mail = MailConfig::from_env(config.mail.provider);
        config.database = DatabaseConfig::from_env_or(config.database);
        config
    }

    /// Validate cross-field constraints
    ///
    /// Returns every problem found, not just the first one.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();
        problems.extend(self.verification.validate());
        problems.extend(self.mail.validate());

        if self.environment.is_production() && self.mail.provider == MailProvider::Log {
            problems.push("mail.provider must not be 'log' in production".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}
