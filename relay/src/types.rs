//! Wire and storage types shared by the relay handlers.

use serde::{Deserialize, Serialize};

/// Push-delivery configuration for one peer on one topic.
///
/// Stored verbatim by the key store and replaced wholesale on
/// re-registration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetails {
    /// Push provider discriminator, e.g. `fcm`. Compared case-insensitively.
    #[serde(rename = "type")]
    pub kind: String,
    /// Provider-specific device token.
    pub token: String,
    pub peer_name: String,
    pub language: String,
}

/// A validated `/new` request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub bridge: String,
    pub topic: String,
    pub details: ClientDetails,
}

/// Body returned on every successful request.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Body returned on every rejected request.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub message: String,
}
