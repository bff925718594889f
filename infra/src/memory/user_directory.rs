//! In-memory implementation of the UserDirectory trait

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use gc_core::domain::entities::User;
use gc_core::errors::DomainError;
use gc_core::repositories::user_directory::user_not_found;
use gc_core::repositories::UserDirectory;

/// User directory backed by a hash map
#[derive(Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user, replacing any existing entry with the same id
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn resolve(&self, user_id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn mark_verified(&self, user_id: Uuid) -> Result<(), DomainError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&user_id).ok_or_else(|| user_not_found(user_id))?;
        user.verify();
        Ok(())
    }
}
