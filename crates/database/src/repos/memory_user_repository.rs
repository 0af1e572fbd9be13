//! In-process user store for tests and ephemeral deployments.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::entities::{FieldUpdate, UserRecord};
use crate::store::UserStore;
use crate::types::StoreResult;

/// Map-backed store. Clones share the same records.
#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserRepository {
    async fn get(&self, user_id: &str) -> StoreResult<Option<UserRecord>> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn create_if_absent(&self, record: &UserRecord) -> StoreResult<bool> {
        let mut users = self.users.write().await;
        match users.entry(record.user_id.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(true)
            }
        }
    }

    async fn update(&self, user_id: &str, update: FieldUpdate) -> StoreResult<bool> {
        let mut users = self.users.write().await;
        match users.get_mut(user_id) {
            Some(record) => {
                update.apply(record);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_if_absent_rejects_second_writer() {
        let repo = MemoryUserRepository::new();

        assert!(repo
            .create_if_absent(&UserRecord::new("alice", "h1", "Alice"))
            .await
            .unwrap());
        assert!(!repo
            .create_if_absent(&UserRecord::new("alice", "h2", "Other"))
            .await
            .unwrap());

        assert_eq!(repo.len().await, 1);
        let stored = repo.get("alice").await.unwrap().unwrap();
        assert_eq!(stored.nickname, "Alice");
    }

    #[tokio::test]
    async fn test_update_requires_existing_record() {
        let repo = MemoryUserRepository::new();

        assert!(!repo
            .update("ghost", FieldUpdate::DeviceAddress("tok".into()))
            .await
            .unwrap());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = MemoryUserRepository::new();
        let other = repo.clone();

        repo.create_if_absent(&UserRecord::new("bob", "h", "Bob"))
            .await
            .unwrap();
        other
            .update("bob", FieldUpdate::DeviceAddress("tok-9".into()))
            .await
            .unwrap();

        let stored = repo.get("bob").await.unwrap().unwrap();
        assert_eq!(stored.device_address.as_deref(), Some("tok-9"));
    }
}
