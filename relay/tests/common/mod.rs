//! Shared helpers for relay integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use push_relay::bridge::BridgeClient;
use push_relay::error::StoreError;
use push_relay::keystore::{KeyStore, MemoryKeyStore, StoreResult};
use push_relay::push::{FcmConfig, FcmProvider, PushProviders};
use push_relay::types::ClientDetails;
use push_relay::validate::BridgeWhitelist;
use push_relay::{build_router, RelayState};
use serde_json::{json, Value};

pub const WEBHOOK: &str = "http://relay.test/push";
pub const FCM_PATH: &str = "/fcm/send";
pub const FCM_KEY: &str = "test-api-key";

/// Store whose backend is always down.
pub struct FailingStore;

#[async_trait]
impl KeyStore for FailingStore {
    async fn set(&self, _topic: &str, _details: &ClientDetails) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn get(&self, _topic: &str) -> StoreResult<Option<ClientDetails>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

pub fn details(kind: &str, token: &str, peer_name: &str, language: &str) -> ClientDetails {
    ClientDetails {
        kind: kind.to_string(),
        token: token.to_string(),
        peer_name: peer_name.to_string(),
        language: language.to_string(),
    }
}

/// Relay state wired to a gateway at `gateway_base` (usually a mock server).
pub fn relay_state(
    store: Arc<dyn KeyStore>,
    gateway_base: &str,
    whitelist: Option<&str>,
) -> Arc<RelayState> {
    let fcm = FcmProvider::new(FcmConfig {
        url: format!("{gateway_base}{FCM_PATH}"),
        api_key: FCM_KEY.to_string(),
    })
    .unwrap();

    Arc::new(RelayState {
        store,
        bridge: BridgeClient::default(),
        providers: PushProviders::new().with(Arc::new(fcm)),
        whitelist: whitelist.map(BridgeWhitelist::parse),
        webhook: WEBHOOK.to_string(),
    })
}

/// Spin up the HTTP server on an OS-assigned port, returning the base URL.
pub async fn spawn_relay(state: Arc<RelayState>) -> String {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

/// Convenience: memory-backed relay, returning the store for inspection.
pub async fn spawn_memory_relay(
    gateway_base: &str,
    whitelist: Option<&str>,
) -> (String, Arc<MemoryKeyStore>) {
    let store = Arc::new(MemoryKeyStore::new());
    let state = relay_state(store.clone(), gateway_base, whitelist);
    (spawn_relay(state).await, store)
}

pub fn registration_body(bridge: &str, topic: &str) -> Value {
    json!({
        "bridge": bridge,
        "topic": topic,
        "type": "fcm",
        "token": "tok",
        "peerName": "Alice",
        "language": "en",
    })
}

/// POSTs `body` as JSON and returns status plus parsed JSON body.
pub async fn post_json(url: &str, body: &Value) -> (u16, Value) {
    let resp = reqwest::Client::new().post(url).json(body).send().await.unwrap();
    let status = resp.status().as_u16();
    let body = resp.json().await.unwrap_or(Value::Null);
    (status, body)
}
