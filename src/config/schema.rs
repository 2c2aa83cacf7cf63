//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file and
//! default every field, so an absent file means an all-default config.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the exporter.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ExporterConfig {
    /// Listener configuration (bind address, metrics path).
    pub listener: ListenerConfig,

    /// RPC client settings.
    pub rpc: RpcConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Path serving the metrics exposition.
    pub metrics_path: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            metrics_path: "/metrics".to_string(),
        }
    }
}

/// RPC client settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RpcConfig {
    /// Upper bound for a single balance query, in seconds.
    ///
    /// Queries run one after another, so a scrape can take up to this value
    /// times the number of wallets. Keep it well under the Prometheus
    /// `scrape_timeout` (10s by default) or one hanging wallet fails the
    /// whole scrape.
    pub timeout_secs: u64,
}

impl RpcConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}
