//! HTTP handlers for registration, dispatch, and health.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use tracing::{debug, info, warn};

use crate::bridge::BridgeClient;
use crate::error::{PushError, RelayError};
use crate::keystore::KeyStore;
use crate::push::PushProviders;
use crate::types::SuccessResponse;
use crate::validate::{validate_push, validate_registration, BridgeWhitelist};

/// Shared state for every request.
pub struct RelayState {
    pub store: Arc<dyn KeyStore>,
    pub bridge: BridgeClient,
    pub providers: PushProviders,
    pub whitelist: Option<BridgeWhitelist>,
    /// This relay's own `/push` URL, handed to bridges on registration.
    pub webhook: String,
}

type HandlerResult = Result<Json<SuccessResponse>, RelayError>;

/// `GET /health`
pub async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// `POST /new`
///
/// The store write is not rolled back if the bridge subscription fails
/// afterwards; the bridge is expected to re-register.
pub async fn register(State(state): State<Arc<RelayState>>, body: Bytes) -> HandlerResult {
    let registration = validate_registration(&body, state.whitelist.as_ref()).inspect_err(|e| {
        debug!("Rejected registration: {}", e);
    })?;

    state
        .store
        .set(&registration.topic, &registration.details)
        .await
        .map_err(|e| {
            warn!("Failed to save client details for topic {}: {}", registration.topic, e);
            RelayError::SaveFailed
        })?;

    state
        .bridge
        .subscribe(&registration.bridge, &registration.topic, &state.webhook)
        .await
        .map_err(|e| {
            warn!(
                "Bridge {} subscription failed for topic {}: {}",
                registration.bridge, registration.topic, e
            );
            RelayError::SubscribeFailed
        })?;

    info!(
        "Registered topic {} ({}) via {}",
        registration.topic, registration.details.kind, registration.bridge
    );
    Ok(Json(SuccessResponse::ok()))
}

/// `POST /push`
pub async fn push(State(state): State<Arc<RelayState>>, body: Bytes) -> HandlerResult {
    let topic = validate_push(&body).inspect_err(|e| {
        debug!("Rejected push: {}", e);
    })?;

    let details = match state.store.get(&topic).await {
        Ok(Some(details)) => details,
        Ok(None) => {
            debug!("No client details for topic {}", topic);
            return Err(RelayError::ClientDetailsUnavailable);
        }
        Err(e) => {
            warn!("Failed to load client details for topic {}: {}", topic, e);
            return Err(RelayError::ClientDetailsUnavailable);
        }
    };

    state.providers.dispatch(&details).await.map_err(|e| {
        match &e {
            PushError::Unsupported(kind) => {
                debug!("Unsupported push type {} for topic {}", kind, topic)
            }
            _ => warn!("Push for topic {} failed: {}", topic, e),
        }
        RelayError::from(e)
    })?;

    info!("Pushed notification for topic {}", topic);
    Ok(Json(SuccessResponse::ok()))
}
