//! Verification token entity for email ownership confirmation.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

/// Number of random bytes behind every token (256 bits)
pub const TOKEN_BYTES: usize = 32;

/// Length of the hex-encoded token string
pub const TOKEN_LENGTH: usize = TOKEN_BYTES * 2;

/// A verification token that has not been persisted yet
///
/// The store assigns the id on creation and hands back a [`VerificationToken`].
#[derive(Clone, PartialEq, Eq)]
pub struct NewVerificationToken {
    /// Owning user (back-reference only)
    pub user_id: Uuid,
    /// Opaque random token string
    pub token: String,
    /// When the token was issued
    pub issued_at: DateTime<Utc>,
    /// First instant at which the token is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl NewVerificationToken {
    /// Issue a fresh token for `user_id` at `now`, valid for `ttl`
    ///
    /// # Errors
    /// * `DomainError::Validation` - `now + ttl` is not representable
    pub fn issue(user_id: Uuid, now: DateTime<Utc>, ttl: Duration) -> DomainResult<Self> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| DomainError::Validation {
                message: format!(
                    "Token TTL of {} seconds overflows the expiry timestamp",
                    ttl.num_seconds()
                ),
            })?;

        Ok(Self {
            user_id,
            token: generate_token(),
            issued_at: now,
            expires_at,
        })
    }

    /// Attach the store-assigned id
    pub fn with_id(self, id: Uuid) -> VerificationToken {
        VerificationToken {
            id,
            user_id: self.user_id,
            token: self.token,
            issued_at: self.issued_at,
            expires_at: self.expires_at,
        }
    }
}

/// Persisted email verification token
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationToken {
    /// Store-assigned identifier
    pub id: Uuid,
    /// Owning user (back-reference only)
    pub user_id: Uuid,
    /// Opaque random token string, unique among live tokens
    pub token: String,
    /// When the token was issued
    pub issued_at: DateTime<Utc>,
    /// First instant at which the token is no longer accepted
    pub expires_at: DateTime<Utc>,
}

impl VerificationToken {
    /// Whether the token is past its TTL at `now`
    ///
    /// The boundary counts as expired: a token is only valid while `now < expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the token would still be accepted at `now`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired_at(now)
    }
}

// The token string is a bearer credential; keep it out of logs.
impl fmt::Debug for VerificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationToken")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("token", &"[REDACTED]")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl fmt::Debug for NewVerificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewVerificationToken")
            .field("user_id", &self.user_id)
            .field("token", &"[REDACTED]")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Generate a hex-encoded token from the OS random source
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
