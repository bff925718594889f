//! MySQL implementation of the TokenStore trait.
//!
//! Rows live in `verify_emails`; ids are stored as hyphenated UUID strings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use gc_core::domain::entities::{NewVerificationToken, VerificationToken};
use gc_core::errors::DomainError;
use gc_core::repositories::token_store::token_not_found;
use gc_core::repositories::TokenStore;

const COLUMNS: &str = "id, user_id, token, issued_at, expires_at";

/// MySQL implementation of TokenStore
pub struct MySqlTokenStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenStore {
    /// Create a new MySQL token store
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to VerificationToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<VerificationToken, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::internal(format!("Failed to get id: {}", e)))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| DomainError::internal(format!("Failed to get user_id: {}", e)))?;

        Ok(VerificationToken {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::internal(format!("Invalid token UUID: {}", e)))?,
            user_id: Uuid::parse_str(&user_id)
                .map_err(|e| DomainError::internal(format!("Invalid user UUID: {}", e)))?,
            token: row
                .try_get("token")
                .map_err(|e| DomainError::internal(format!("Failed to get token: {}", e)))?,
            issued_at: row
                .try_get::<DateTime<Utc>, _>("issued_at")
                .map_err(|e| DomainError::internal(format!("Failed to get issued_at: {}", e)))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::internal(format!("Failed to get expires_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl TokenStore for MySqlTokenStore {
    async fn create(&self, token: NewVerificationToken) -> Result<VerificationToken, DomainError> {
        let saved = token.with_id(Uuid::new_v4());

        let query = r#"
            INSERT INTO verify_emails (id, user_id, token, issued_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(saved.id.to_string())
            .bind(saved.user_id.to_string())
            .bind(&saved.token)
            .bind(saved.issued_at)
            .bind(saved.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => DomainError::Validation {
                    message: "Token already exists".to_string(),
                },
                _ => DomainError::internal(format!("Failed to save verification token: {}", e)),
            })?;

        Ok(saved)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<VerificationToken>, DomainError> {
        let query = format!("SELECT {} FROM verify_emails WHERE token = ?", COLUMNS);

        let row = sqlx::query(&query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to find verification token: {}", e)))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM verify_emails WHERE id = ?")
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to check token existence: {}", e)))?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| DomainError::internal(format!("Failed to get count: {}", e)))?;
        Ok(count > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM verify_emails WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to delete verification token: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(token_not_found(id));
        }
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<VerificationToken>, DomainError> {
        let query = format!("SELECT {} FROM verify_emails ORDER BY issued_at", COLUMNS);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to list verification tokens: {}", e)))?;

        rows.iter().map(Self::row_to_token).collect()
    }

    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM verify_emails WHERE expires_at <= ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("Failed to delete expired tokens: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }
}
