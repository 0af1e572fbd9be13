//! In-process doubles for the store and push ports.

use std::sync::Arc;

use async_trait::async_trait;
use relay_config::PasswordHashConfig;
use relay_database::{FieldUpdate, StoreError, StoreResult, UserRecord, UserStore};
use tokio::sync::Mutex;

use crate::push::{DeliveryReceipt, PushError, PushGateway, PushNotification};
use crate::utils::CredentialHasher;

/// Hasher with the smallest work factor argon2 accepts.
pub fn cheap_hasher() -> CredentialHasher {
    CredentialHasher::new(&PasswordHashConfig {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    })
    .expect("minimal argon2 parameters are valid")
}

/// Store whose every call fails with [`StoreError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

#[async_trait]
impl UserStore for UnavailableStore {
    async fn get(&self, _user_id: &str) -> StoreResult<Option<UserRecord>> {
        Err(StoreError::Unavailable("store is offline".into()))
    }

    async fn create_if_absent(&self, _record: &UserRecord) -> StoreResult<bool> {
        Err(StoreError::Unavailable("store is offline".into()))
    }

    async fn update(&self, _user_id: &str, _update: FieldUpdate) -> StoreResult<bool> {
        Err(StoreError::Unavailable("store is offline".into()))
    }
}

/// Store that fails lookups of a single user and delegates everything else.
#[derive(Clone)]
pub struct FailingLookupStore {
    inner: Arc<dyn UserStore>,
    failing_user_id: String,
}

impl FailingLookupStore {
    pub fn new(inner: Arc<dyn UserStore>, failing_user_id: impl Into<String>) -> Self {
        Self {
            inner,
            failing_user_id: failing_user_id.into(),
        }
    }
}

#[async_trait]
impl UserStore for FailingLookupStore {
    async fn get(&self, user_id: &str) -> StoreResult<Option<UserRecord>> {
        if user_id == self.failing_user_id {
            return Err(StoreError::Unavailable(format!("lookup of {user_id} failed")));
        }
        self.inner.get(user_id).await
    }

    async fn create_if_absent(&self, record: &UserRecord) -> StoreResult<bool> {
        self.inner.create_if_absent(record).await
    }

    async fn update(&self, user_id: &str, update: FieldUpdate) -> StoreResult<bool> {
        self.inner.update(user_id, update).await
    }
}

/// Gateway that records every send and answers with a fixed outcome.
#[derive(Clone, Default)]
pub struct RecordingPushGateway {
    sent: Arc<Mutex<Vec<(String, PushNotification)>>>,
    reject_with: Option<u16>,
}

impl RecordingPushGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that rejects every message with the given status.
    pub fn rejecting(status: u16) -> Self {
        Self {
            reject_with: Some(status),
            ..Self::default()
        }
    }

    pub async fn sent(&self) -> Vec<(String, PushNotification)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl PushGateway for RecordingPushGateway {
    async fn send(
        &self,
        address: &str,
        notification: &PushNotification,
    ) -> Result<DeliveryReceipt, PushError> {
        let mut sent = self.sent.lock().await;
        sent.push((address.to_string(), notification.clone()));

        match self.reject_with {
            Some(status) => Err(PushError::Rejected {
                status,
                message: "rejected by test gateway".into(),
            }),
            None => Ok(DeliveryReceipt(format!("msg-{}", sent.len()))),
        }
    }
}
