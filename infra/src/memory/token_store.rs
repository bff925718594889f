//! In-memory implementation of the TokenStore trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use gc_core::domain::entities::{NewVerificationToken, VerificationToken};
use gc_core::errors::DomainError;
use gc_core::repositories::token_store::token_not_found;
use gc_core::repositories::TokenStore;

#[derive(Default)]
struct Tables {
    by_id: HashMap<Uuid, VerificationToken>,
    // token string -> id
    by_token: HashMap<String, Uuid>,
}

/// Token store backed by a pair of hash maps behind one lock
#[derive(Clone, Default)]
pub struct InMemoryTokenStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.tables.read().await.by_id.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn create(&self, token: NewVerificationToken) -> Result<VerificationToken, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.by_token.contains_key(&token.token) {
            return Err(DomainError::Validation {
                message: "Token already exists".to_string(),
            });
        }

        let saved = token.with_id(Uuid::new_v4());
        tables.by_token.insert(saved.token.clone(), saved.id);
        tables.by_id.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<VerificationToken>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .by_token
            .get(token)
            .and_then(|id| tables.by_id.get(id))
            .cloned())
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.tables.read().await.by_id.contains_key(&id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        let removed = tables.by_id.remove(&id).ok_or_else(|| token_not_found(id))?;
        tables.by_token.remove(&removed.token);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<VerificationToken>, DomainError> {
        let tables = self.tables.read().await;
        let mut all: Vec<VerificationToken> = tables.by_id.values().cloned().collect();
        all.sort_by_key(|t| t.issued_at);
        Ok(all)
    }

    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut tables = self.tables.write().await;
        let expired: Vec<VerificationToken> = tables
            .by_id
            .values()
            .filter(|t| t.expires_at <= cutoff)
            .cloned()
            .collect();

        for token in &expired {
            tables.by_id.remove(&token.id);
            tables.by_token.remove(&token.token);
        }
        Ok(expired.len())
    }
}
