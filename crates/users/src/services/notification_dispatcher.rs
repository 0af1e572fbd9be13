//! Routine status notifications between users.

use std::collections::BTreeMap;
use std::sync::Arc;

use relay_database::UserStore;
use tracing::{info, warn};

use super::log_failure;
use crate::push::{DeliveryReceipt, PushGateway, PushNotification};
use crate::types::{RelayError, RelayResult, RoutineNotificationRequest};
use crate::utils::{require_flag, require_text};

pub const ROUTINE_NOTIFICATION_TITLE: &str = "Routine update";

/// Build the push payload for a routine status change.
///
/// `sender` is the display name shown to the receiver; `from_user` is echoed
/// untouched in the data block.
pub fn compose_routine_notification(
    sender: &str,
    from_user: &str,
    routine_name: &str,
    is_performed: bool,
) -> PushNotification {
    let body = if is_performed {
        format!("{sender} has completed the routine \"{routine_name}\".")
    } else {
        format!("{sender} has not completed the routine \"{routine_name}\" yet.")
    };

    let mut data = BTreeMap::new();
    data.insert("fromUser".to_string(), from_user.to_string());
    data.insert("routineName".to_string(), routine_name.to_string());
    data.insert("isPerformed".to_string(), is_performed.to_string());

    PushNotification {
        title: ROUTINE_NOTIFICATION_TITLE.to_string(),
        body,
        data,
    }
}

/// Resolves both ends of a notification and hands it to the push gateway.
#[derive(Clone)]
pub struct NotificationDispatcher {
    store: Arc<dyn UserStore>,
    gateway: Arc<dyn PushGateway>,
}

impl NotificationDispatcher {
    pub fn new(store: Arc<dyn UserStore>, gateway: Arc<dyn PushGateway>) -> Self {
        Self { store, gateway }
    }

    pub async fn dispatch(&self, request: RoutineNotificationRequest) -> RelayResult<DeliveryReceipt> {
        let from_user = request.from_user.clone();
        let to_user = request.to_user.clone();
        self.try_dispatch(request).await.inspect_err(|e| {
            log_failure("dispatch", from_user.as_deref(), to_user.as_deref(), e)
        })
    }

    async fn try_dispatch(
        &self,
        request: RoutineNotificationRequest,
    ) -> RelayResult<DeliveryReceipt> {
        let from_user = require_text("fromUser", request.from_user)?;
        let to_user = require_text("toUser", request.to_user)?;
        let routine_name = require_text("routineName", request.routine_name)?;
        let is_performed = require_flag("isPerformed", request.is_performed)?;

        let receiver = self.store.get(&to_user).await?.ok_or(RelayError::NotFound)?;
        let Some(address) = receiver.device_address else {
            return Err(RelayError::NoAddress);
        };

        let sender = self.display_name(&from_user).await;
        let notification =
            compose_routine_notification(&sender, &from_user, &routine_name, is_performed);

        let receipt = self.gateway.send(&address, &notification).await?;

        info!(
            from_user = %from_user,
            to_user = %to_user,
            receipt = %receipt,
            "routine notification sent"
        );
        Ok(receipt)
    }

    async fn display_name(&self, from_user: &str) -> String {
        match self.store.get(from_user).await {
            Ok(Some(record)) => record.nickname,
            Ok(None) => from_user.to_string(),
            Err(e) => {
                warn!(from_user = %from_user, error = %e, "sender lookup failed, using raw id");
                from_user.to_string()
            }
        }
    }
}
