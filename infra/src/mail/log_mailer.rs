//! Log Mailer Implementation
//!
//! Development mailer that writes messages to the console instead of
//! sending them.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use gc_core::errors::MailError;
use gc_core::services::verification::Mailer;
use gc_shared::email::{is_valid_email, mask_email};

/// Mailer for development and testing
///
/// This implementation:
/// - Prints the full message to stdout (optional)
/// - Logs a masked summary through tracing
/// - Tracks message count for testing
/// - Can simulate transport failures
#[derive(Clone)]
pub struct LogMailer {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: Arc<AtomicBool>,
    /// Whether to print messages to console
    console_output: bool,
}

impl LogMailer {
    /// Create a new log mailer with console output enabled
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a log mailer with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }
}

impl Default for LogMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError> {
        let masked = mask_email(to);
        if !is_valid_email(to) {
            return Err(MailError::InvalidAddress { address: masked });
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!("Log mailer simulating failure for recipient: {}", masked);
            return Err(MailError::Transport {
                message: "Simulated mail delivery failure".to_string(),
            });
        }

        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("LOG MAILER - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", to);
            println!("Subject: {}", subject);
            println!("{}", html_body);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "mail_service",
            provider = "log",
            recipient = %masked,
            subject = subject,
            body_length = html_body.len(),
            "Mail logged instead of sent"
        );

        Ok(())
    }

    fn provider_name(&self) -> &str {
        "log"
    }
}
