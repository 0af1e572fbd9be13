//! HTTP push delivery in the FCM v1 message format.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use relay_config::PushConfig;
use relay_users::{DeliveryReceipt, PushError, PushGateway, PushNotification};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Longest slice of an error response body kept in [`PushError::Rejected`].
const MAX_ERROR_BODY: usize = 512;

#[derive(Serialize)]
struct SendRequest<'a> {
    message: Message<'a>,
}

#[derive(Serialize)]
struct Message<'a> {
    token: &'a str,
    notification: Notification<'a>,
    data: &'a BTreeMap<String, String>,
}

#[derive(Serialize)]
struct Notification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Deserialize)]
struct SendResponse {
    name: Option<String>,
}

/// Sends one message per call to a configured HTTP endpoint.
///
/// A gateway without an API key still constructs, so the service can boot for
/// everything except delivery; sends then fail with [`PushError::NotConfigured`].
#[derive(Clone)]
pub struct FcmGateway {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl FcmGateway {
    pub fn from_config(config: &PushConfig) -> Result<Self, PushError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent("relay-backend")
            .build()
            .map_err(|e| PushError::Transport(e.to_string()))?;

        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            warn!("push.api_key is not set, notifications cannot be delivered");
        }

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl PushGateway for FcmGateway {
    async fn send(
        &self,
        address: &str,
        notification: &PushNotification,
    ) -> Result<DeliveryReceipt, PushError> {
        let api_key = self.api_key.as_deref().ok_or(PushError::NotConfigured)?;

        let payload = SendRequest {
            message: Message {
                token: address,
                notification: Notification {
                    title: &notification.title,
                    body: &notification.body,
                },
                data: &notification.data,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PushError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let mut message = response.text().await.unwrap_or_default();
            if message.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| message.is_char_boundary(*i))
                    .unwrap_or(0);
                message.truncate(cut);
            }
            return Err(PushError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SendResponse = response
            .json()
            .await
            .map_err(|e| PushError::InvalidResponse(e.to_string()))?;
        let name = parsed
            .name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| PushError::InvalidResponse("missing message name".into()))?;

        debug!(receipt = %name, "push gateway accepted message");
        Ok(DeliveryReceipt(name))
    }
}
