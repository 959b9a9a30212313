//! SQLite-backed store.
//!
//! Records are JSON-encoded in a single table. A file path can be shared by
//! several relay processes; SQLite's own locking gives last-write-wins.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use super::{KeyStore, StoreResult};
use crate::error::StoreError;
use crate::types::ClientDetails;

/// Persistent store for client details backed by SQLite.
#[derive(Clone)]
pub struct SqliteKeyStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteKeyStore {
    /// Opens (or creates) a store at the given path.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Unavailable(format!("failed to open key store: {e}")))?;
        Self::with_connection(conn)
    }

    /// Opens an in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            StoreError::Unavailable(format!("failed to open in-memory key store: {e}"))
        })?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(
            "
            PRAGMA busy_timeout = 5000;
            CREATE TABLE IF NOT EXISTS client_details (
                topic TEXT PRIMARY KEY,
                details TEXT NOT NULL
            );
            ",
        )
        .map_err(|e| StoreError::Unavailable(format!("failed to init key store schema: {e}")))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Unavailable("key store lock poisoned".to_string()))?;
            f(&*guard)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("key store task failed: {e}")))?
    }
}

#[async_trait]
impl KeyStore for SqliteKeyStore {
    async fn set(&self, topic: &str, details: &ClientDetails) -> StoreResult<()> {
        let topic = topic.to_string();
        let encoded = serde_json::to_string(details)?;
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO client_details (topic, details) VALUES (?1, ?2)
                 ON CONFLICT(topic) DO UPDATE SET details = excluded.details",
                params![topic, encoded],
            )
            .map_err(|e| StoreError::Unavailable(format!("failed to save client details: {e}")))?;
            Ok(())
        })
        .await
    }

    async fn get(&self, topic: &str) -> StoreResult<Option<ClientDetails>> {
        let topic = topic.to_string();
        let encoded = self
            .with_conn(move |conn| {
                conn.query_row(
                    "SELECT details FROM client_details WHERE topic = ?1",
                    params![topic],
                    |row| row.get::<_, String>(0),
                )
                .optional()
                .map_err(|e| StoreError::Unavailable(format!("failed to load client details: {e}")))
            })
            .await?;

        match encoded {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}
