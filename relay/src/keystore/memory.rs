use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KeyStore, StoreResult};
use crate::types::ClientDetails;

/// In-process store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    records: RwLock<HashMap<String, ClientDetails>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered topics.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn set(&self, topic: &str, details: &ClientDetails) -> StoreResult<()> {
        self.records
            .write()
            .await
            .insert(topic.to_string(), details.clone());
        Ok(())
    }

    async fn get(&self, topic: &str) -> StoreResult<Option<ClientDetails>> {
        Ok(self.records.read().await.get(topic).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(token: &str) -> ClientDetails {
        ClientDetails {
            kind: "fcm".to_string(),
            token: token.to_string(),
            peer_name: "Alice".to_string(),
            language: "en".to_string(),
        }
    }

    #[tokio::test]
    async fn get_missing_topic_is_none() {
        let store = MemoryKeyStore::new();
        assert_eq!(store.get("nope").await.unwrap(), None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn set_overwrites_previous_record() {
        let store = MemoryKeyStore::new();
        store.set("t1", &details("first")).await.unwrap();
        store.set("t1", &details("second")).await.unwrap();

        assert_eq!(store.get("t1").await.unwrap(), Some(details("second")));
        assert_eq!(store.len().await, 1);
    }
}
