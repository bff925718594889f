//! Mock implementation of UserDirectory for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::r#trait::{user_not_found, UserDirectory};

/// Mock user directory for testing
pub struct MockUserDirectory {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    should_fail: AtomicBool,
    mark_calls: AtomicUsize,
}

impl MockUserDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            should_fail: AtomicBool::new(false),
            mark_calls: AtomicUsize::new(0),
        }
    }

    /// Register a user
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Make `mark_verified` fail with an internal error
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Number of `mark_verified` calls made so far
    pub fn mark_calls(&self) -> usize {
        self.mark_calls.load(Ordering::SeqCst)
    }

    /// Current verified flag of a user, if known
    pub async fn is_verified(&self, user_id: Uuid) -> Option<bool> {
        self.users.read().await.get(&user_id).map(|u| u.is_verified)
    }
}

impl Default for MockUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn resolve(&self, user_id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn mark_verified(&self, user_id: Uuid) -> Result<(), DomainError> {
        self.mark_calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("User directory unavailable"));
        }

        let mut users = self.users.write().await;
        let user = users.get_mut(&user_id).ok_or_else(|| user_not_found(user_id))?;
        user.verify();
        Ok(())
    }
}
