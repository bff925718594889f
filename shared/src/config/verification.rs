//! Email verification configuration

use serde::{Deserialize, Serialize};

/// Default validity window for verification tokens, in hours
pub const DEFAULT_VERIFY_EMAIL_TIME_HOUR: i64 = 24;

/// Longest accepted token validity window, in hours (one year)
pub const MAX_VERIFY_EMAIL_TIME_HOUR: i64 = 8760;

/// Longest accepted grace period before the sweep removes an expired token, in hours
pub const MAX_CLEANUP_GRACE_HOURS: i64 = 8760;

/// Configuration for issuing and consuming email verification tokens
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Token time-to-live in hours (`VERIFY_EMAIL_TIME_HOUR`)
    pub verify_email_time_hour: i64,

    /// Public base URL embedded in the verification link (`SERVER_ADDRESS`)
    pub address: String,

    /// Upper bound for a single mail delivery attempt, in seconds
    #[serde(default = "default_mail_send_timeout")]
    pub mail_send_timeout_secs: u64,

    /// Expired token sweep
    #[serde(default)]
    pub cleanup: CleanupConfig,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            verify_email_time_hour: DEFAULT_VERIFY_EMAIL_TIME_HOUR,
            address: String::from("http://localhost:8080"),
            mail_send_timeout_secs: default_mail_send_timeout(),
            cleanup: CleanupConfig::default(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let verify_email_time_hour = std::env::var("VERIFY_EMAIL_TIME_HOUR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.verify_email_time_hour);
        let address = std::env::var("SERVER_ADDRESS").unwrap_or(defaults.address);
        let mail_send_timeout_secs = std::env::var("MAIL_SEND_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.mail_send_timeout_secs);

        Self {
            verify_email_time_hour,
            address,
            mail_send_timeout_secs,
            cleanup: CleanupConfig::from_env(),
        }
    }

    pub(crate) fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !(1..=MAX_VERIFY_EMAIL_TIME_HOUR).contains(&self.verify_email_time_hour) {
            problems.push(format!(
                "verification.verify_email_time_hour must be between 1 and {}, got {}",
                MAX_VERIFY_EMAIL_TIME_HOUR, self.verify_email_time_hour
            ));
        }
        if self.address.trim().is_empty() {
            problems.push("verification.address must not be empty".to_string());
        }
        problems.extend(self.cleanup.validate());
        problems
    }
}

/// Periodic removal of expired, never-consumed tokens
///
/// Disabled by default: expired records are kept until deleted explicitly.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CleanupConfig {
    /// Whether the background sweep runs at all
    #[serde(default)]
    pub enabled: bool,

    /// How often to run the sweep (in seconds)
    #[serde(default = "default_cleanup_interval")]
    pub interval_seconds: u64,

    /// How long an expired record is kept before it becomes eligible (in hours)
    #[serde(default = "default_grace_period")]
    pub grace_period_hours: i64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_seconds: default_cleanup_interval(),
            grace_period_hours: default_grace_period(),
        }
    }
}

impl CleanupConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("VERIFY_EMAIL_CLEANUP_ENABLED")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.enabled),
            interval_seconds: std::env::var("VERIFY_EMAIL_CLEANUP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.interval_seconds),
            grace_period_hours: std::env::var("VERIFY_EMAIL_CLEANUP_GRACE_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.grace_period_hours),
        }
    }

    pub(crate) fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !(0..=MAX_CLEANUP_GRACE_HOURS).contains(&self.grace_period_hours) {
            problems.push(format!(
                "verification.cleanup.grace_period_hours must be between 0 and {}, got {}",
                MAX_CLEANUP_GRACE_HOURS, self.grace_period_hours
            ));
        }
        problems
    }
}

fn default_mail_send_timeout() -> u64 {
    30
}

fn default_cleanup_interval() -> u64 {
    3600
}

fn default_grace_period() -> i64 {
    24
}
