//! Relay operations.
//!
//! Each service holds only shared handles to its ports, so clones are cheap
//! and every call is independent of the others.

use tracing::{error, warn};

use crate::types::RelayError;

pub mod credential_manager;
pub mod device_registry;
pub mod notification_dispatcher;

pub use credential_manager::CredentialManager;
pub use device_registry::DeviceAddressRegistry;
pub use notification_dispatcher::{
    compose_routine_notification, NotificationDispatcher, ROUTINE_NOTIFICATION_TITLE,
};

/// Record a failed operation with the ids it was called with.
///
/// `to_user` is only set by dispatch, where `user_id` is the sender.
fn log_failure(
    operation: &'static str,
    user_id: Option<&str>,
    to_user: Option<&str>,
    failure: &RelayError,
) {
    let category = failure.category();
    if failure.is_server_fault() {
        error!(operation, user_id, to_user, category, error = %failure, "relay operation failed");
    } else {
        warn!(operation, user_id, to_user, category, error = %failure, "relay operation rejected");
    }
}
