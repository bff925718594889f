//! Main verification service implementation

use std::sync::Arc;
use uuid::Uuid;

use gc_shared::config::verification::MAX_VERIFY_EMAIL_TIME_HOUR;
use gc_shared::email::{is_valid_email, mask_email};

use crate::domain::entities::user::User;
use crate::domain::entities::verification_token::{NewVerificationToken, VerificationToken};
use crate::errors::{DomainError, DomainResult, MailError, VerificationError};
use crate::repositories::user_directory::user_not_found;
use crate::repositories::{TokenStore, UserDirectory};

use super::clock::Clock;
use super::config::VerificationServiceConfig;
use super::email::VerificationEmail;
use super::traits::Mailer;
use super::types::{DeliveryHandle, TokenHandle, VerifiedEmail};

/// Verification service for email ownership tokens
///
/// Holds no mutable state of its own; every call goes through the injected
/// store, directory, mailer and clock.
pub struct VerificationService<T, U, M>
where
    T: TokenStore,
    U: UserDirectory,
    M: Mailer + ?Sized + 'static,
{
    /// Token persistence
    store: Arc<T>,
    /// User lookup and verified flag
    users: Arc<U>,
    /// Outbound mail
    mailer: Arc<M>,
    /// Time source
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<T, U, M> VerificationService<T, U, M>
where
    T: TokenStore,
    U: UserDirectory,
    M: Mailer + ?Sized + 'static,
{
    /// Create a new verification service
    ///
    /// # Errors
    /// * `DomainError::Validation` - TTL outside `(0, MAX_VERIFY_EMAIL_TIME_HOUR]` or empty server address
    pub fn new(
        store: Arc<T>,
        users: Arc<U>,
        mailer: Arc<M>,
        clock: Arc<dyn Clock>,
        config: VerificationServiceConfig,
    ) -> DomainResult<Self> {
        if config.token_ttl <= chrono::Duration::zero()
            || config.token_ttl > chrono::Duration::hours(MAX_VERIFY_EMAIL_TIME_HOUR)
        {
            return Err(DomainError::Validation {
                message: format!(
                    "Token TTL must be positive and at most {} hours, got {} seconds",
                    MAX_VERIFY_EMAIL_TIME_HOUR,
                    config.token_ttl.num_seconds()
                ),
            });
        }
        if config.server_address.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "Server address must not be empty".to_string(),
            });
        }

        Ok(Self {
            store,
            users,
            mailer,
            clock,
            config,
        })
    }

    /// Service configuration
    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue a verification token for `user` and send it by email
    ///
    /// Returns as soon as the record is persisted. Delivery runs on a spawned
    /// task; its outcome is logged and available through the returned
    /// [`DeliveryHandle`] but never changes this method's result.
    ///
    /// # Returns
    /// * `Ok(TokenHandle)` - Persisted record plus delivery handle
    /// * `Err(DomainError::Validation)` - The user's address is malformed
    /// * `Err(DomainError)` - The store rejected the record
    ///
    /// Surrounding whitespace in the address is dropped before validation and
    /// delivery.
    pub async fn issue(&self, user: &User) -> DomainResult<TokenHandle> {
        let address = user.email.trim();
        let masked = mask_email(address);
        if !is_valid_email(address) {
            tracing::warn!(
                user_id = %user.id,
                email = %masked,
                event = "verification_issue_rejected",
                "Refusing to issue verification token for malformed address"
            );
            return Err(DomainError::Validation {
                message: format!("Invalid email address: {}", masked),
            });
        }

        let now = self.clock.now();
        let new_token = NewVerificationToken::issue(user.id, now, self.config.token_ttl)?;
        let token = self.store.create(new_token).await.map_err(|e| {
            tracing::error!(
                user_id = %user.id,
                error = %e,
                event = "verification_token_store_failed",
                "Failed to persist verification token"
            );
            e
        })?;

        tracing::info!(
            user_id = %user.id,
            token_id = %token.id,
            email = %masked,
            expires_at = %token.expires_at,
            event = "verification_token_issued",
            "Issued email verification token"
        );

        let link = self.config.verification_link(&token.token);
        let email = VerificationEmail::compose(&user.first_name, &link);
        let delivery = self.spawn_delivery(address.to_string(), masked, token.id, email);

        Ok(TokenHandle { token, delivery })
    }

    /// Consume a token and mark its owner verified
    ///
    /// # Returns
    /// * `Ok(VerifiedEmail)` - Token accepted and deleted
    /// * `Err(VerificationError::TokenNotFound)` - No record matches
    /// * `Err(VerificationError::TokenExpired)` - Record past its TTL, left in place
    /// * `Err(DomainError)` - Store or directory failure
    pub async fn verify(&self, token: &str) -> DomainResult<VerifiedEmail> {
        let record = match self.store.find_by_token(token).await? {
            Some(record) => record,
            None => {
                tracing::info!(
                    event = "verification_token_not_found",
                    "Verification attempted with unknown token"
                );
                return Err(VerificationError::TokenNotFound.into());
            }
        };

        let now = self.clock.now();
        if record.is_expired_at(now) {
            tracing::warn!(
                user_id = %record.user_id,
                token_id = %record.id,
                expired_at = %record.expires_at,
                event = "verification_token_expired",
                "Verification attempted with expired token"
            );
            return Err(VerificationError::TokenExpired {
                expired_at: record.expires_at,
            }
            .into());
        }

        self.users.mark_verified(record.user_id).await?;

        match self.store.delete(record.id).await {
            Ok(()) => {}
            Err(DomainError::NotFound { .. }) => {
                // A concurrent verify consumed the same token first
                tracing::debug!(
                    token_id = %record.id,
                    event = "verification_token_already_consumed",
                    "Token was deleted by a concurrent verification"
                );
            }
            Err(e) => return Err(e),
        }

        tracing::info!(
            user_id = %record.user_id,
            token_id = %record.id,
            event = "email_verified",
            "Email address verified"
        );

        Ok(VerifiedEmail {
            user_id: record.user_id,
            token_id: record.id,
            verified_at: now,
        })
    }

    /// Every stored token record, live or expired
    pub async fn list_all(&self) -> DomainResult<Vec<VerificationToken>> {
        self.store.find_all().await
    }

    /// Delete a token record by id
    ///
    /// # Returns
    /// * `Ok(())` - Record removed
    /// * `Err(VerificationError::RecordNotFound)` - No record with that id
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if !self.store.exists_by_id(id).await? {
            return Err(VerificationError::RecordNotFound { id }.into());
        }

        match self.store.delete(id).await {
            Ok(()) => {
                tracing::info!(
                    token_id = %id,
                    event = "verification_token_deleted",
                    "Deleted verification token"
                );
                Ok(())
            }
            Err(DomainError::NotFound { .. }) => Err(VerificationError::RecordNotFound { id }.into()),
            Err(e) => Err(e),
        }
    }

    /// Issue a fresh token for a registered, not yet verified user
    ///
    /// Earlier tokens for the same user are left as they are.
    ///
    /// # Returns
    /// * `Ok(TokenHandle)` - New token issued
    /// * `Err(DomainError::NotFound)` - Unknown user
    /// * `Err(VerificationError::AlreadyVerified)` - Nothing left to verify
    pub async fn reissue(&self, user_id: Uuid) -> DomainResult<TokenHandle> {
        let user = self
            .users
            .resolve(user_id)
            .await?
            .ok_or_else(|| user_not_found(user_id))?;

        if user.is_verified {
            tracing::info!(
                user_id = %user_id,
                event = "verification_reissue_skipped",
                "User already verified, not reissuing token"
            );
            return Err(VerificationError::AlreadyVerified { user_id }.into());
        }

        self.issue(&user).await
    }

    fn spawn_delivery(
        &self,
        to: String,
        masked: String,
        token_id: Uuid,
        email: VerificationEmail,
    ) -> DeliveryHandle {
        let mailer = Arc::clone(&self.mailer);
        let timeout = self.config.mail_send_timeout;

        let handle = tokio::spawn(async move {
            let send = mailer.send(&to, &email.subject, &email.html_body);
            let result = match tokio::time::timeout(timeout, send).await {
                Ok(result) => result,
                Err(_) => Err(MailError::Timeout(timeout)),
            };

            match &result {
                Ok(()) => tracing::info!(
                    token_id = %token_id,
                    email = %masked,
                    provider = mailer.provider_name(),
                    event = "verification_email_sent",
                    "Verification email delivered"
                ),
                Err(e) => tracing::error!(
                    token_id = %token_id,
                    email = %masked,
                    provider = mailer.provider_name(),
                    error = %e,
                    event = "verification_email_failed",
                    "Failed to deliver verification email"
                ),
            }
            result
        });

        DeliveryHandle::new(handle)
    }
}
