//! Runtime configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Where the dashboard finds its node, its wallet file and how often it polls.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Full node HTTP endpoint
    pub full_node: String,
    /// Per-request timeout of the HTTP client
    pub request_timeout: Duration,
    /// Encrypted wallet record
    pub store_path: PathBuf,
    /// Passphrase protecting the wallet record
    pub store_passphrase: Option<String>,
    pub sync_interval: Duration,
    pub block_interval: Duration,
    /// Blocks shown by the latest-blocks view
    pub latest_block_count: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            full_node: "http://localhost:8090".to_string(),
            request_timeout: Duration::from_secs(10),
            store_path: PathBuf::from("trondeck-wallet.bin"),
            store_passphrase: None,
            sync_interval: Duration::from_secs(30),
            block_interval: Duration::from_secs(60),
            latest_block_count: 5,
        }
    }
}

fn parsed<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.trim().parse().ok())
}

impl DashboardConfig {
    /// Load from `TRONDECK_*` environment variables; unset or unparsable
    /// values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            full_node: env::var("TRONDECK_FULL_NODE").unwrap_or(defaults.full_node),
            request_timeout: parsed("TRONDECK_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            store_path: env::var("TRONDECK_STORE")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            store_passphrase: env::var("TRONDECK_PASSPHRASE").ok(),
            sync_interval: parsed("TRONDECK_SYNC_SECS")
                .filter(|secs: &u64| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.sync_interval),
            block_interval: parsed("TRONDECK_BLOCK_SECS")
                .filter(|secs: &u64| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.block_interval),
            latest_block_count: parsed("TRONDECK_BLOCK_COUNT")
                .filter(|count: &usize| *count > 0)
                .unwrap_or(defaults.latest_block_count),
        }
    }
}
