//! Outbound mail integration

use async_trait::async_trait;

use crate::errors::MailError;

/// Trait for mail delivery integration
///
/// Called from a spawned task, so implementations must be shareable across
/// threads. A returned error is logged by the caller and goes no further.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one HTML message to `to`
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError>;

    /// Short provider name for log output
    fn provider_name(&self) -> &str;
}
