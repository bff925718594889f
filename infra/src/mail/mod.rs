//! Mail Service Module
//!
//! Outbound mail transports implementing the core [`Mailer`] contract:
//!
//! - **SMTP**: Delivery through an SMTP relay using lettre
//! - **Log**: Console/log output for development
//! - **Security**: Recipient masking in logs

use std::sync::Arc;

use gc_core::services::verification::Mailer;
use gc_shared::config::{MailConfig, MailProvider};

pub mod log_mailer;
pub mod smtp;

pub use log_mailer::LogMailer;
pub use smtp::SmtpMailer;


/// Create a mailer based on configuration
///
/// Falls back to [`LogMailer`] when the SMTP transport cannot be set up, so
/// issuance keeps working and the failure shows up in the logs.
pub fn create_mailer(config: &MailConfig) -> Arc<dyn Mailer> {
    match config.provider {
        MailProvider::Log => Arc::new(LogMailer::new()),
        MailProvider::Smtp => match SmtpMailer::new(config) {
            Ok(mailer) => Arc::new(mailer),
            Err(e) => {
                tracing::error!("Failed to initialize SMTP mailer: {}", e);
                tracing::warn!("Falling back to log mailer");
                Arc::new(LogMailer::new())
            }
        },
    }
}
