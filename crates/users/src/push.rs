//! The push delivery port.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// A notification ready for delivery to one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
    /// String-only key/value block delivered alongside the visible message.
    pub data: BTreeMap<String, String>,
}

/// Identifier the push transport assigned to an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt(pub String);

impl DeliveryReceipt {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeliveryReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum PushError {
    #[error("push gateway is not configured")]
    NotConfigured,

    #[error("push transport error: {0}")]
    Transport(String),

    #[error("push gateway rejected the message with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("invalid push gateway response: {0}")]
    InvalidResponse(String),
}

/// Best-effort delivery of a notification to a device address.
#[async_trait]
pub trait PushGateway: Send + Sync {
    async fn send(
        &self,
        address: &str,
        notification: &PushNotification,
    ) -> Result<DeliveryReceipt, PushError>;
}
