//! Opt-in sweep of expired verification tokens
//!
//! Expired records are kept by default so an expired link keeps reporting
//! "expired" rather than "not found". Enabling the sweep trades that for a
//! bounded table.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use gc_shared::config::CleanupConfig;

use crate::errors::DomainError;
use crate::repositories::TokenStore;

use super::clock::Clock;

/// Service for deleting verification tokens long past their expiry
pub struct VerificationCleanupService<T: TokenStore + 'static> {
    store: Arc<T>,
    clock: Arc<dyn Clock>,
    config: CleanupConfig,
}

impl<T: TokenStore + 'static> VerificationCleanupService<T> {
    /// Create a new cleanup service
    pub fn new(store: Arc<T>, clock: Arc<dyn Clock>, config: CleanupConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Run a single cleanup cycle
    ///
    /// Deletes records whose `expires_at + grace_period <= now`. Does nothing
    /// when the sweep is disabled. A negative grace period is treated as zero
    /// so the cutoff never lies in the future.
    ///
    /// # Returns
    /// * `Ok(CleanupResult)` - Summary of the cycle
    /// * `Err(DomainError::Validation)` - Grace period too large to compute a cutoff
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let cutoff = self.cutoff()?;
        info!(cutoff = %cutoff, "Starting verification token cleanup cycle");

        let mut result = CleanupResult::default();
        match self.store.delete_expired(cutoff).await {
            Ok(count) => {
                result.expired_tokens_deleted = count;
                info!(
                    deleted = count,
                    event = "verification_cleanup_completed",
                    "Deleted {} expired verification tokens",
                    count
                );
            }
            Err(e) => {
                error!("Failed to cleanup expired verification tokens: {}", e);
                result.errors.push(format!("Token cleanup error: {}", e));
            }
        }

        Ok(result)
    }

    fn cutoff(&self) -> Result<DateTime<Utc>, DomainError> {
        let hours = self.config.grace_period_hours;
        if hours < 0 {
            warn!(
                grace_period_hours = hours,
                "Negative cleanup grace period, using zero"
            );
        }

        chrono::Duration::try_hours(hours.max(0))
            .and_then(|grace| self.clock.now().checked_sub_signed(grace))
            .ok_or_else(|| DomainError::Validation {
                message: format!("Cleanup grace period of {} hours is out of range", hours),
            })
    }

    /// Start the cleanup service as a background task
    ///
    /// Returns `None` without spawning when the sweep is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<tokio::task::JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Verification token cleanup is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                "Verification token cleanup started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.is_success() {
                            warn!("Cleanup completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("Verification token cleanup cycle failed: {}", e);
                    }
                }
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of expired token records deleted
    pub expired_tokens_deleted: usize,
    /// Any errors encountered during cleanup
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// Check if the cleanup was successful (no errors)
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
