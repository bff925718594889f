//! Configuration for the verification service

use chrono::Duration;

use gc_shared::config::verification::{
    VerificationConfig, DEFAULT_VERIFY_EMAIL_TIME_HOUR, MAX_VERIFY_EMAIL_TIME_HOUR,
};

use crate::errors::DomainError;

/// Default bound on one delivery attempt
pub const DEFAULT_MAIL_SEND_TIMEOUT_SECS: u64 = 30;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Validity window of an issued token
    pub token_ttl: Duration,
    /// Public base URL used to build verification links
    pub server_address: String,
    /// Upper bound for a single delivery attempt
    pub mail_send_timeout: std::time::Duration,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::hours(DEFAULT_VERIFY_EMAIL_TIME_HOUR),
            server_address: String::from("http://localhost:8080"),
            mail_send_timeout: std::time::Duration::from_secs(DEFAULT_MAIL_SEND_TIMEOUT_SECS),
        }
    }
}

impl VerificationServiceConfig {
    /// Link the user follows to consume `token`
    pub fn verification_link(&self, token: &str) -> String {
        format!(
            "{}/ownSecurity/verifyEmail?token={}",
            self.server_address.trim_end_matches('/'),
            token
        )
    }
}

impl TryFrom<&VerificationConfig> for VerificationServiceConfig {
    type Error = DomainError;

    fn try_from(config: &VerificationConfig) -> Result<Self, Self::Error> {
        let hours = config.verify_email_time_hour;
        let token_ttl = Duration::try_hours(hours)
            .filter(|_| (1..=MAX_VERIFY_EMAIL_TIME_HOUR).contains(&hours))
            .ok_or_else(|| DomainError::Validation {
                message: format!(
                    "Token TTL must be between 1 and {} hours, got {}",
                    MAX_VERIFY_EMAIL_TIME_HOUR, hours
                ),
            })?;

        Ok(Self {
            token_ttl,
            server_address: config.address.clone(),
            mail_send_timeout: std::time::Duration::from_secs(config.mail_send_timeout_secs),
        })
    }
}
