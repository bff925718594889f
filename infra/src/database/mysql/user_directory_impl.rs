//! MySQL implementation of the UserDirectory trait over the `users` table.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use gc_core::domain::entities::User;
use gc_core::errors::DomainError;
use gc_core::repositories::user_directory::user_not_found;
use gc_core::repositories::UserDirectory;

/// MySQL implementation of UserDirectory
pub struct MySqlUserDirectory {
    pool: MySqlPool,
}

impl MySqlUserDirectory {
    /// Create a new MySQL user directory
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid user UUID: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::internal(format!("Failed to get email: {}", e)))?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| DomainError::internal(format!("Failed to get first_name: {}", e)))?,
            is_verified: row
                .try_get("email_verified")
                .map_err(|e| DomainError::internal(format!("Failed to get email_verified: {}", e)))?,
        })
    }
}

#[async_trait]
impl UserDirectory for MySqlUserDirectory {
    async fn resolve(&self, user_id: Uuid) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            "SELECT id, email, first_name, email_verified FROM users WHERE id = ?",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::internal(format!("Failed to find user: {}", e)))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn mark_verified(&self, user_id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET email_verified = TRUE WHERE id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to mark user verified: {}", e)))?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        // Zero affected rows also means "already verified" on servers that
        // report changed rather than matched rows
        match self.resolve(user_id).await? {
            Some(_) => Ok(()),
            None => Err(user_not_found(user_id)),
        }
    }
}
