//! SMTP mailer using lettre's async transport

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use gc_core::errors::MailError;
use gc_core::services::verification::Mailer;
use gc_shared::config::MailConfig;
use gc_shared::email::mask_email;

use crate::InfrastructureError;

/// Mailer delivering HTML messages through an SMTP relay
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build the transport from `config.smtp_url`
    ///
    /// Does not connect; the first send does.
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let url = config.smtp_url.as_deref().ok_or_else(|| {
            InfrastructureError::Config("mail.smtp_url must be set for the smtp provider".to_string())
        })?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(url)?.build();
        let address = config.from_address.parse::<Address>().map_err(|e| {
            InfrastructureError::Config(format!(
                "Invalid sender address {}: {}",
                config.from_address, e
            ))
        })?;

        debug!(from = %config.from_address, "SMTP mailer configured");

        Ok(Self {
            transport,
            from: Mailbox::new(Some(config.from_name.clone()), address),
        })
    }

    pub(crate) fn build_message(
        &self,
        to: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<Message, MailError> {
        let recipient = to.parse::<Address>().map_err(|_| MailError::InvalidAddress {
            address: mask_email(to),
        })?;

        Message::builder()
            .from(self.from.clone())
            .to(Mailbox::new(None, recipient))
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| MailError::Message {
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), MailError> {
        let message = self.build_message(to, subject, html_body)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport {
                message: e.to_string(),
            })?;

        info!(
            target: "mail_service",
            provider = "smtp",
            recipient = %mask_email(to),
            code = %response.code(),
            "Mail accepted by relay"
        );
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "smtp"
    }
}
