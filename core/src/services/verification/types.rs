//! Types for verification service results

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::domain::entities::verification_token::VerificationToken;
use crate::errors::MailError;

/// Result of issuing a verification token
#[derive(Debug)]
pub struct TokenHandle {
    /// The persisted token record
    pub token: VerificationToken,
    /// Background delivery of the verification email
    pub delivery: DeliveryHandle,
}

/// Handle on a spawned delivery task
///
/// Dropping it detaches the task; delivery continues regardless.
#[derive(Debug)]
pub struct DeliveryHandle {
    inner: JoinHandle<Result<(), MailError>>,
}

impl DeliveryHandle {
    pub(crate) fn new(inner: JoinHandle<Result<(), MailError>>) -> Self {
        Self { inner }
    }

    /// Whether the delivery task has completed
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// Wait for the delivery outcome
    pub async fn wait(self) -> Result<(), MailError> {
        match self.inner.await {
            Ok(result) => result,
            Err(e) => Err(MailError::Transport {
                message: format!("delivery task did not complete: {}", e),
            }),
        }
    }
}

/// Result of a successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedEmail {
    /// User whose address is now verified
    pub user_id: Uuid,
    /// Id of the consumed token record
    pub token_id: Uuid,
    /// When the token was accepted
    pub verified_at: DateTime<Utc>,
}
