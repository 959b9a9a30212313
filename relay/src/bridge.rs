//! Client for the bridge service's subscribe endpoint.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::BridgeError;

#[derive(Debug, Serialize)]
struct SubscribeRequest<'a> {
    topic: &'a str,
    webhook: &'a str,
}

#[derive(Debug, Deserialize)]
struct SubscribeResponse {
    success: Option<Value>,
}

/// Loose truthiness: `false`, `null`, `0`, `""` and a missing field are
/// false, anything else is true.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Subscribes webhooks on bridge servers.
///
/// The bridge base URL comes from each registration, so one client serves
/// every bridge and shares its connection pool across requests.
#[derive(Clone, Debug, Default)]
pub struct BridgeClient {
    client: Client,
}

impl BridgeClient {
    /// `POST <bridge>/subscribe` with `{topic, webhook}`.
    ///
    /// Succeeds only on a 2xx response whose body has a truthy `success`.
    pub async fn subscribe(&self, bridge: &str, topic: &str, webhook: &str) -> Result<(), BridgeError> {
        let url = format!("{}/subscribe", bridge.trim_end_matches('/'));
        debug!("Subscribing topic on {}", url);

        let response = self
            .client
            .post(&url)
            .json(&SubscribeRequest { topic, webhook })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::Status(status.as_u16()));
        }

        let body: SubscribeResponse = response.json().await?;
        if !is_truthy(body.success.as_ref()) {
            return Err(BridgeError::Refused);
        }
        Ok(())
    }
}
