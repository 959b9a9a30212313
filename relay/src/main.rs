//! Push relay binary.
//!
//! Usage:
//!   push-relay --host relay.example.com --fcm-api-key <key>
//!
//! Every flag can also be set through the environment (`HOST`,
//! `FCM_API_KEY`, `BRIDGE_WHITELIST`, ...).

use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use push_relay::bridge::BridgeClient;
use push_relay::config::{RelayConfig, StoreKind};
use push_relay::keystore::{KeyStore, MemoryKeyStore, SqliteKeyStore};
use push_relay::push::{FcmProvider, PushProviders};
use push_relay::{build_router, RelayState};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &RelayConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level)
        .with_context(|| format!("Invalid log level {:?}", config.log_level))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact();

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.init(),
    }
    Ok(())
}

fn open_store(kind: &StoreKind) -> Result<Arc<dyn KeyStore>> {
    Ok(match kind {
        StoreKind::Memory => Arc::new(MemoryKeyStore::new()),
        StoreKind::Sqlite(path) => {
            info!("Opening key store at {:?}", path);
            Arc::new(SqliteKeyStore::open(path).context("Failed to open key store")?)
        }
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = RelayConfig::parse();
    init_tracing(&config)?;

    info!("Push relay starting...");
    let fcm = FcmProvider::new(config.fcm()).context("Failed to set up FCM provider")?;
    let state = Arc::new(RelayState {
        store: open_store(&config.store)?,
        bridge: BridgeClient::default(),
        providers: PushProviders::new().with(Arc::new(fcm)),
        whitelist: config.whitelist(),
        webhook: config.webhook_url(),
    });
    info!(
        "Webhook {}, providers {:?}, bridge whitelist {}",
        state.webhook,
        state.providers.names(),
        if state.whitelist.is_some() { "on" } else { "off" }
    );

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("Server listening on {}", config.bind);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}
