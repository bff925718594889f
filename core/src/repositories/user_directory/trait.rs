//! User directory trait: the slice of account storage the verification
//! lifecycle needs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Lookup and verification-flag updates for registered users
///
/// Implementations should make [`UserDirectory::mark_verified`] idempotent:
/// marking an already verified user again is not an error.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve a user by id
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No such user
    /// * `Err(DomainError)` - Storage error
    async fn resolve(&self, user_id: Uuid) -> Result<Option<User>, DomainError>;

    /// Set the user's verified flag
    ///
    /// # Returns
    /// * `Ok(())` - Flag set (or already set)
    /// * `Err(DomainError::NotFound)` - No such user
    /// * `Err(DomainError)` - Storage error
    async fn mark_verified(&self, user_id: Uuid) -> Result<(), DomainError>;
}

/// Not-found error for a missing user
pub fn user_not_found(user_id: Uuid) -> DomainError {
    DomainError::NotFound {
        resource: format!("user {}", user_id),
    }
}
