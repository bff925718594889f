//! Configuration management for infrastructure services
//!
//! Layering, lowest precedence first:
//! 1. Environment preset plus flat variables (`VERIFY_EMAIL_TIME_HOUR`,
//!    `SERVER_ADDRESS`, `DATABASE_URL`, ...)
//! 2. Optional `config.<environment>.toml` in the working directory
//! 3. Nested `GREENCITY__SECTION__KEY` variables

use ::config::{Config, Environment as EnvSource, File};

use gc_shared::config::{AppConfig, Environment};

use crate::InfrastructureError;

/// Prefix for nested environment overrides
pub const ENV_PREFIX: &str = "GREENCITY";

/// Load and validate application configuration for the current environment
pub fn load_config() -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok(); // Load .env file if present
    load_config_for(Environment::from_env())
}

/// Load and validate application configuration for `environment`
pub fn load_config_for(environment: Environment) -> Result<AppConfig, InfrastructureError> {
    let mut base = AppConfig::from_env();
    base.environment = environment;

    let settings = Config::builder()
        .add_source(Config::try_from(&base)?)
        .add_source(File::with_name(environment.config_file()).required(false))
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;

    if let Err(problems) = config.validate() {
        for problem in &problems {
            tracing::error!(problem = %problem, "Invalid configuration");
        }
        return Err(InfrastructureError::Config(problems.join("; ")));
    }

    tracing::debug!(
        environment = %config.environment,
        mail_provider = ?config.mail.provider,
        "Configuration loaded"
    );
    Ok(config)
}
