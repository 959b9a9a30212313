//! Request validation.
//!
//! Checks run in a fixed order and stop at the first failure, so the
//! message a caller sees for a given payload never changes.

use serde_json::{Map, Value};

use crate::error::RelayError;
use crate::types::{ClientDetails, Registration};

/// Set of bridge origins allowed to register topics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BridgeWhitelist {
    bridges: Vec<String>,
}

impl BridgeWhitelist {
    /// Parses a comma-separated list. Whitespace around entries is ignored,
    /// as are empty entries.
    pub fn parse(list: &str) -> Self {
        let bridges = list
            .split(',')
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string)
            .collect();
        Self { bridges }
    }

    pub fn contains(&self, bridge: &str) -> bool {
        self.bridges.iter().any(|b| b == bridge)
    }

    pub fn is_empty(&self) -> bool {
        self.bridges.is_empty()
    }
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, RelayError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(RelayError::InvalidBody),
    }
}

fn required_str(map: &Map<String, Value>, field: &'static str) -> Result<String, RelayError> {
    match map.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(RelayError::InvalidField(field)),
    }
}

/// Validates a `/new` body against the optional whitelist.
pub fn validate_registration(
    body: &[u8],
    whitelist: Option<&BridgeWhitelist>,
) -> Result<Registration, RelayError> {
    let map = parse_object(body)?;

    let bridge = required_str(&map, "bridge")?;
    let topic = required_str(&map, "topic")?;
    let kind = required_str(&map, "type")?;
    let token = required_str(&map, "token")?;
    let peer_name = required_str(&map, "peerName")?;
    let language = required_str(&map, "language")?;

    if let Some(whitelist) = whitelist {
        if !whitelist.contains(&bridge) {
            return Err(RelayError::BridgeNotAllowed);
        }
    }

    Ok(Registration {
        bridge,
        topic,
        details: ClientDetails {
            kind,
            token,
            peer_name,
            language,
        },
    })
}

/// Validates a `/push` body and returns the topic.
pub fn validate_push(body: &[u8]) -> Result<String, RelayError> {
    let map = parse_object(body)?;
    required_str(&map, "topic")
}
