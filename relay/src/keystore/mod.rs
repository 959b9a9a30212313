//! Topic to client-details persistence.
//!
//! Handlers only ever see `Arc<dyn KeyStore>`, so the backend can be
//! swapped without touching request logic. Several relay processes may
//! share one backend; no in-process caching is assumed.

mod memory;
mod sqlite;

pub use memory::MemoryKeyStore;
pub use sqlite::SqliteKeyStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::ClientDetails;

/// Result type for key store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Abstract key/value store for [`ClientDetails`] keyed by topic.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Creates or overwrites the record for `topic`.
    async fn set(&self, topic: &str, details: &ClientDetails) -> StoreResult<()>;

    /// Returns the record for `topic`, or `None` if it was never registered.
    async fn get(&self, topic: &str) -> StoreResult<Option<ClientDetails>>;
}
