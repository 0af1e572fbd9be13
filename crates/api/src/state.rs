use std::sync::Arc;

use relay_users::{
    CredentialHasher, CredentialManager, DeviceAddressRegistry, NotificationDispatcher,
    PushGateway, UserStore,
};

#[derive(Clone)]
pub struct AppState {
    credentials: CredentialManager,
    devices: DeviceAddressRegistry,
    notifications: NotificationDispatcher,
}

impl AppState {
    pub fn new(
        credentials: CredentialManager,
        devices: DeviceAddressRegistry,
        notifications: NotificationDispatcher,
    ) -> Self {
        Self {
            credentials,
            devices,
            notifications,
        }
    }

    /// Build every service over one store and one gateway.
    pub fn from_ports(
        store: Arc<dyn UserStore>,
        hasher: CredentialHasher,
        gateway: Arc<dyn PushGateway>,
    ) -> Self {
        Self::new(
            CredentialManager::new(store.clone(), hasher),
            DeviceAddressRegistry::new(store.clone()),
            NotificationDispatcher::new(store, gateway),
        )
    }

    pub fn credentials(&self) -> &CredentialManager {
        &self.credentials
    }

    pub fn devices(&self) -> &DeviceAddressRegistry {
        &self.devices
    }

    pub fn notifications(&self) -> &NotificationDispatcher {
        &self.notifications
    }
}
