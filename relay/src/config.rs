//! Process configuration, from flags or environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::push::FcmConfig;
use crate::validate::BridgeWhitelist;

/// Where client details are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Sqlite(PathBuf),
}

impl StoreKind {
    fn parse(value: &str) -> Result<Self, String> {
        match value.trim() {
            "" => Err("store must be `memory` or a SQLite file path".to_string()),
            "memory" => Ok(StoreKind::Memory),
            path => Ok(StoreKind::Sqlite(PathBuf::from(path))),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "push-relay")]
#[command(about = "Topic-scoped push notification relay")]
pub struct RelayConfig {
    /// Externally reachable host of this relay, used to build the webhook
    #[arg(long, env = "HOST", default_value = "localhost:5001")]
    pub host: String,

    /// Address to listen on
    #[arg(long, env = "BIND", default_value = "0.0.0.0:5001")]
    pub bind: SocketAddr,

    /// Push gateway send URL
    #[arg(long, env = "FCM_URL", default_value = "https://fcm.googleapis.com/fcm/send")]
    pub fcm_url: String,

    /// Push gateway server key
    #[arg(long, env = "FCM_API_KEY", hide_env_values = true)]
    pub fcm_api_key: String,

    /// Comma-separated list of bridges allowed to register
    #[arg(long, env = "BRIDGE_WHITELIST")]
    pub bridge_whitelist: Option<String>,

    /// `memory` or a path to a SQLite database
    #[arg(long, env = "STORE", default_value = "memory", value_parser = StoreKind::parse)]
    pub store: StoreKind,

    /// Tracing filter directive, e.g. `info` or `push_relay=debug`
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Append logs to this file instead of stdout
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl RelayConfig {
    /// URL bridges call to trigger a push.
    pub fn webhook_url(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.contains("://") {
            format!("{host}/push")
        } else {
            format!("http://{host}/push")
        }
    }

    /// Parsed whitelist, or `None` when unset or blank.
    pub fn whitelist(&self) -> Option<BridgeWhitelist> {
        self.bridge_whitelist
            .as_deref()
            .map(BridgeWhitelist::parse)
            .filter(|w| !w.is_empty())
    }

    pub fn fcm(&self) -> FcmConfig {
        FcmConfig {
            url: self.fcm_url.clone(),
            api_key: self.fcm_api_key.clone(),
        }
    }
}
