//! Error types for the relay.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

use crate::types::ErrorResponse;

/// Errors raised by a [`KeyStore`](crate::keystore::KeyStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached or rejected the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from the bridge subscribe call.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("bridge returned status {0}")]
    Status(u16),

    #[error("bridge refused subscription")]
    Refused,
}

/// Errors from a push provider.
#[derive(Debug, Error)]
pub enum PushError {
    #[error("push notification type not supported: {0}")]
    Unsupported(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gateway returned status {0}")]
    Status(u16),

    #[error("gateway rejected notification")]
    Rejected,

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Client-facing failures. Every variant maps to `400 {"message": ...}`.
///
/// The display strings are the public contract; backend detail stays in
/// the logs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error("Error: missing or invalid request body")]
    InvalidBody,

    #[error("Error: missing or invalid {0} field")]
    InvalidField(&'static str),

    #[error("Error: invalid bridge value")]
    BridgeNotAllowed,

    #[error("Error: failed to save client details")]
    SaveFailed,

    #[error("Error: failed to subscribe to bridge server")]
    SubscribeFailed,

    #[error("Error: failed to get client details")]
    ClientDetailsUnavailable,

    #[error("Error: push notification type not supported")]
    UnsupportedType,

    #[error("Error: failed to push notification")]
    PushFailed,
}

impl From<PushError> for RelayError {
    fn from(err: PushError) -> Self {
        match err {
            PushError::Unsupported(_) => RelayError::UnsupportedType,
            _ => RelayError::PushFailed,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
