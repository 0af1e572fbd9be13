//! Device address registration.

use std::sync::Arc;

use relay_database::{FieldUpdate, UserStore};
use tracing::info;

use super::log_failure;
use crate::types::{DeviceAddressRequest, RelayError, RelayResult};
use crate::utils::require_text;

/// Stores the push address of existing users.
#[derive(Clone)]
pub struct DeviceAddressRegistry {
    store: Arc<dyn UserStore>,
}

impl DeviceAddressRegistry {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Overwrite the user's device address. Unknown users are never created here.
    pub async fn set_address(&self, request: DeviceAddressRequest) -> RelayResult<()> {
        let user_id = request.user_id.clone();
        self.try_set_address(request)
            .await
            .inspect_err(|e| log_failure("set_address", user_id.as_deref(), None, e))
    }

    async fn try_set_address(&self, request: DeviceAddressRequest) -> RelayResult<()> {
        let user_id = require_text("userId", request.user_id)?;
        let address = require_text("address", request.address)?;

        if !self
            .store
            .update(&user_id, FieldUpdate::DeviceAddress(address))
            .await?
        {
            return Err(RelayError::NotFound);
        }

        info!(user_id = %user_id, "device address updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::log_capture::capture_logs;
    use relay_database::{MemoryUserRepository, UserRecord};

    async fn registry_with_user() -> (DeviceAddressRegistry, MemoryUserRepository) {
        let store = MemoryUserRepository::new();
        store
            .create_if_absent(&UserRecord::new("bob", "hash", "Bob"))
            .await
            .unwrap();
        (DeviceAddressRegistry::new(Arc::new(store.clone())), store)
    }

    #[tokio::test]
    async fn set_address_overwrites_previous_value() {
        let (registry, store) = registry_with_user().await;

        registry
            .set_address(DeviceAddressRequest::new("bob", "tok-1"))
            .await
            .unwrap();
        registry
            .set_address(DeviceAddressRequest::new("bob", "tok-2"))
            .await
            .unwrap();

        let record = store.get("bob").await.unwrap().unwrap();
        assert_eq!(record.device_address.as_deref(), Some("tok-2"));
    }

    #[tokio::test]
    async fn set_address_is_idempotent() {
        let (registry, store) = registry_with_user().await;

        for _ in 0..3 {
            registry
                .set_address(DeviceAddressRequest::new("bob", "tok-123"))
                .await
                .unwrap();
        }

        let record = store.get("bob").await.unwrap().unwrap();
        assert_eq!(record.device_address.as_deref(), Some("tok-123"));
        assert_eq!(record.password_hash, "hash");
    }

    #[tokio::test]
    async fn set_address_for_unknown_user_does_not_create_account() {
        let (registry, store) = registry_with_user().await;

        let err = registry
            .set_address(DeviceAddressRequest::new("ghost", "tok"))
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::NotFound));
        assert!(store.get("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejected_address_is_logged_with_user_id() {
        let (registry, _store) = registry_with_user().await;
        let (logs, _guard) = capture_logs();

        registry
            .set_address(DeviceAddressRequest::new("ghost", "tok-secretish"))
            .await
            .unwrap_err();

        let out = logs.contents();
        assert!(out.contains("set_address") && out.contains("ghost"), "{out}");
        assert!(out.contains("not_found"), "{out}");
    }

    #[tokio::test]
    async fn set_address_rejects_missing_address() {
        let (registry, _store) = registry_with_user().await;

        let err = registry
            .set_address(DeviceAddressRequest {
                user_id: Some("bob".into()),
                address: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::Validation(_)));
    }
}
