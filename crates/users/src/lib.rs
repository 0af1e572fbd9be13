//! # Relay Users Crate
//!
//! Credential lifecycle, device address registration, and routine notification
//! dispatch for the relay service.
//!
//! ## Architecture
//!
//! - **Services**: `CredentialManager`, `DeviceAddressRegistry`, `NotificationDispatcher`
//! - **Push**: the `PushGateway` port and its payload types
//! - **Types**: requests and the `RelayError` taxonomy
//! - **Utils**: password hashing and input validation
//!
//! Storage goes through the `UserStore` port from `relay-database`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use relay_config::PasswordHashConfig;
//! use relay_users::{CredentialHasher, CredentialManager, MemoryUserRepository, RegisterRequest};
//!
//! # async fn run() -> Result<(), relay_users::RelayError> {
//! let hasher = CredentialHasher::new(&PasswordHashConfig::default())?;
//! let manager = CredentialManager::new(Arc::new(MemoryUserRepository::new()), hasher);
//! manager.register(RegisterRequest::new("alice", "pw1", "Alice")).await?;
//! # Ok(())
//! # }
//! ```

pub mod push;
pub mod services;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use relay_database::{MemoryUserRepository, UserRecord, UserRepository, UserStore};

pub use push::{DeliveryReceipt, PushError, PushGateway, PushNotification};
pub use services::{
    compose_routine_notification, CredentialManager, DeviceAddressRegistry,
    NotificationDispatcher, ROUTINE_NOTIFICATION_TITLE,
};
pub use types::{
    ChangePasswordRequest, DeviceAddressRequest, LoginRequest, RegisterRequest, RelayError,
    RelayResult, RoutineNotificationRequest,
};
pub use utils::CredentialHasher;
