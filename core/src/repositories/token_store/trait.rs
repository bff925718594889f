//! Token store trait defining the interface for verification token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::verification_token::{NewVerificationToken, VerificationToken};
use crate::errors::DomainError;

/// Repository trait for [`VerificationToken`] persistence
///
/// Implementations only need per-call atomicity. Concurrent issuance for the
/// same user may leave several live tokens; nothing here deduplicates them.
///
/// # Example
/// ```no_run
/// # use chrono::{Duration, Utc};
/// # use uuid::Uuid;
/// # use gc_core::repositories::TokenStore;
/// # use gc_core::domain::entities::NewVerificationToken;
/// # async fn example(store: &impl TokenStore) -> Result<(), Box<dyn std::error::Error>> {
/// let new = NewVerificationToken::issue(Uuid::new_v4(), Utc::now(), Duration::hours(24))?;
/// let saved = store.create(new).await?;
///
/// if let Some(found) = store.find_by_token(&saved.token).await? {
///     println!("token {} expires at {}", found.id, found.expires_at);
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persist a new token and assign its id
    ///
    /// # Returns
    /// * `Ok(VerificationToken)` - The stored record with its id
    /// * `Err(DomainError)` - Save failed (e.g., duplicate token string)
    async fn create(&self, token: NewVerificationToken) -> Result<VerificationToken, DomainError>;

    /// Find a token record by its token string
    ///
    /// # Returns
    /// * `Ok(Some(VerificationToken))` - Record found
    /// * `Ok(None)` - No record matches
    /// * `Err(DomainError)` - Storage error
    async fn find_by_token(&self, token: &str) -> Result<Option<VerificationToken>, DomainError>;

    /// Check whether a record with `id` exists
    async fn exists_by_id(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete the record with `id`
    ///
    /// # Returns
    /// * `Ok(())` - Record removed
    /// * `Err(DomainError::NotFound)` - No such record
    /// * `Err(DomainError)` - Storage error
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;

    /// List every stored record, live or expired
    async fn find_all(&self) -> Result<Vec<VerificationToken>, DomainError>;

    /// Delete every record with `expires_at <= cutoff`
    ///
    /// The default walks [`TokenStore::find_all`]; adapters backed by a query
    /// language should override it with a single statement.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records removed
    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut deleted = 0;
        for token in self.find_all().await? {
            if token.expires_at > cutoff {
                continue;
            }
            match self.delete(token.id).await {
                Ok(()) => deleted += 1,
                // Removed concurrently (consumed or deleted by an admin)
                Err(DomainError::NotFound { .. }) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(deleted)
    }
}

/// Not-found error for a missing token record
pub fn token_not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        resource: format!("verification token {}", id),
    }
}
