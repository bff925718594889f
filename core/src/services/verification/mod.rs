//! Email verification token lifecycle
//!
//! This module provides:
//! - Token issuance with fire-and-forget email delivery
//! - Single-use token verification with expiry checks
//! - Administrative listing and deletion of token records
//! - An opt-in sweep for long-expired records

mod cleanup;
mod clock;
mod config;
mod email;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupResult, VerificationCleanupService};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{VerificationServiceConfig, DEFAULT_MAIL_SEND_TIMEOUT_SECS};
pub use email::{VerificationEmail, VERIFICATION_SUBJECT};
pub use service::VerificationService;
pub use traits::Mailer;
pub use types::{DeliveryHandle, TokenHandle, VerifiedEmail};
