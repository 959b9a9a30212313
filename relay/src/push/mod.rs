//! Push providers and dispatch by provider type.
//!
//! Each provider handles one `type` value. The registry is closed: a type
//! with no registered provider is rejected, never silently dropped.

mod fcm;

pub use fcm::{FcmConfig, FcmProvider};

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::PushError;
use crate::types::ClientDetails;

/// A push delivery backend.
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Lower-case `type` value this provider handles.
    fn name(&self) -> &'static str;

    /// Delivers one notification for `details`. Single attempt, no retry.
    async fn send(&self, details: &ClientDetails) -> Result<(), PushError>;
}

/// Providers keyed by lower-case type.
#[derive(Clone, Default)]
pub struct PushProviders {
    providers: HashMap<&'static str, Arc<dyn PushProvider>>,
}

impl PushProviders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `provider`, replacing any previous one with the same name.
    pub fn with(mut self, provider: Arc<dyn PushProvider>) -> Self {
        self.providers.insert(provider.name(), provider);
        self
    }

    /// Returns the provider for `kind`, compared case-insensitively.
    pub fn get(&self, kind: &str) -> Option<&Arc<dyn PushProvider>> {
        self.providers.get(kind.to_ascii_lowercase().as_str())
    }

    /// Sends `details` through the provider matching its type.
    pub async fn dispatch(&self, details: &ClientDetails) -> Result<(), PushError> {
        let provider = self
            .get(&details.kind)
            .ok_or_else(|| PushError::Unsupported(details.kind.clone()))?;
        provider.send(details).await
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.providers.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for PushProviders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushProviders")
            .field("providers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingProvider {
        sent: AtomicUsize,
    }

    #[async_trait]
    impl PushProvider for CountingProvider {
        fn name(&self) -> &'static str {
            "fcm"
        }

        async fn send(&self, _details: &ClientDetails) -> Result<(), PushError> {
            self.sent.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn details(kind: &str) -> ClientDetails {
        ClientDetails {
            kind: kind.to_string(),
            token: "tok".to_string(),
            peer_name: "Alice".to_string(),
            language: "en".to_string(),
        }
    }

    #[tokio::test]
    async fn dispatch_ignores_type_case() {
        let provider = Arc::new(CountingProvider::default());
        let providers = PushProviders::new().with(provider.clone());

        providers.dispatch(&details("fcm")).await.unwrap();
        providers.dispatch(&details("FCM")).await.unwrap();
        providers.dispatch(&details("Fcm")).await.unwrap();

        assert_eq!(provider.sent.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn unknown_type_is_unsupported() {
        let provider = Arc::new(CountingProvider::default());
        let providers = PushProviders::new().with(provider.clone());

        let err = providers.dispatch(&details("apns")).await.unwrap_err();
        assert!(matches!(err, PushError::Unsupported(kind) if kind == "apns"));
        assert_eq!(provider.sent.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn names_are_sorted() {
        let providers = PushProviders::new().with(Arc::new(CountingProvider::default()));
        assert_eq!(providers.names(), vec!["fcm"]);
        assert!(format!("{providers:?}").contains("fcm"));
    }
}
