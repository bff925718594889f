//! Mock implementation of TokenStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_token::{NewVerificationToken, VerificationToken};
use crate::errors::DomainError;

use super::r#trait::{token_not_found, TokenStore};

/// Mock token store for testing
///
/// Keeps records in insertion order and can be switched into a failing mode
/// to exercise store-error propagation.
pub struct MockTokenStore {
    tokens: Arc<RwLock<HashMap<Uuid, VerificationToken>>>,
    order: Arc<RwLock<Vec<Uuid>>>,
    should_fail: AtomicBool,
    delete_calls: AtomicUsize,
}

impl MockTokenStore {
    /// Create a new mock store
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            order: Arc::new(RwLock::new(Vec::new())),
            should_fail: AtomicBool::new(false),
            delete_calls: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent call fail with an internal error
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Number of `delete` calls made so far, successful or not
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("Token store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for MockTokenStore {
    async fn create(&self, token: NewVerificationToken) -> Result<VerificationToken, DomainError> {
        self.check()?;
        let mut tokens = self.tokens.write().await;

        // Check for duplicate
        if tokens.values().any(|t| t.token == token.token) {
            return Err(DomainError::Validation {
                message: "Token already exists".to_string(),
            });
        }

        let saved = token.with_id(Uuid::new_v4());
        tokens.insert(saved.id, saved.clone());
        self.order.write().await.push(saved.id);
        Ok(saved)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<VerificationToken>, DomainError> {
        self.check()?;
        let tokens = self.tokens.read().await;
        Ok(tokens.values().find(|t| t.token == token).cloned())
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        self.check()?;
        Ok(self.tokens.read().await.contains_key(&id))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if self.tokens.write().await.remove(&id).is_none() {
            return Err(token_not_found(id));
        }
        self.order.write().await.retain(|existing| *existing != id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<VerificationToken>, DomainError> {
        self.check()?;
        let tokens = self.tokens.read().await;
        let order = self.order.read().await;
        Ok(order.iter().filter_map(|id| tokens.get(id).cloned()).collect())
    }
}
