//! Firebase Cloud Messaging over the legacy HTTP endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::PushProvider;
use crate::error::PushError;
use crate::i18n::format_message;
use crate::types::ClientDetails;

/// Fixed gateway request timeout.
pub const FCM_TIMEOUT: Duration = Duration::from_secs(3);

/// FCM gateway settings.
#[derive(Clone)]
pub struct FcmConfig {
    /// Full send URL, e.g. `https://fcm.googleapis.com/fcm/send`.
    pub url: String,
    /// Server key sent as `Authorization: key=<api_key>`.
    pub api_key: String,
}

impl std::fmt::Debug for FcmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FcmConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct Notification<'a> {
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct Envelope<'a> {
    to: &'a str,
    notification: Notification<'a>,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    success: Option<Value>,
}

/// Sends notifications through an FCM-compatible gateway.
#[derive(Clone, Debug)]
pub struct FcmProvider {
    url: String,
    client: Client,
}

impl FcmProvider {
    /// Builds the provider with its own client carrying the auth header and
    /// the fixed timeout.
    pub fn new(config: FcmConfig) -> Result<Self, PushError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("key={}", config.api_key))
            .map_err(|e| PushError::Config(format!("invalid FCM API key: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(FCM_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            url: config.url,
            client,
        })
    }
}

#[async_trait]
impl PushProvider for FcmProvider {
    fn name(&self) -> &'static str {
        "fcm"
    }

    async fn send(&self, details: &ClientDetails) -> Result<(), PushError> {
        let body = format_message(&details.peer_name, &details.language);
        let envelope = Envelope {
            to: &details.token,
            notification: Notification { body: &body },
        };

        let response = self.client.post(&self.url).json(&envelope).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PushError::Status(status.as_u16()));
        }

        let reply: SendResponse = response.json().await?;
        let delivered = reply
            .success
            .as_ref()
            .and_then(Value::as_f64)
            .is_some_and(|n| n == 1.0);
        if !delivered {
            debug!("FCM reply without success=1: {:?}", reply.success);
            return Err(PushError::Rejected);
        }
        Ok(())
    }
}
