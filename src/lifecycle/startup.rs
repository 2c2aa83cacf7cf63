//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the effective configuration (file, then overrides)
//! - Build the routing table and the collector
//! - Bind the listener last, so traffic only arrives when ready
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - No RPC endpoint is contacted before the first scrape

use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::blockchain::HttpConnector;
use crate::collector::BalanceCollector;
use crate::config::loader::{check_config, load_config, load_routes, ConfigError};
use crate::config::schema::ExporterConfig;
use crate::routing::RoutingTable;

/// Errors that stop the exporter before it serves.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Error starting server on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Values that override the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}

/// Load the optional config file, apply overrides, validate the result.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: Overrides,
) -> Result<ExporterConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => ExporterConfig::default(),
    };

    if let Some(address) = overrides.bind_address {
        config.listener.bind_address = address;
    }
    if let Some(level) = overrides.log_level {
        config.observability.log_level = level;
    }

    check_config(config)
}

/// Parse the mapping and build the collector around the HTTP connector.
pub fn build_collector(
    config: &ExporterConfig,
    raw_mapping: Option<&str>,
) -> Result<Arc<BalanceCollector>, ConfigError> {
    let routes: RoutingTable = load_routes(raw_mapping)?;
    tracing::info!(
        endpoints = routes.endpoint_count(),
        wallets = routes.wallet_count(),
        "Routing table loaded"
    );
    for (endpoint, wallets) in routes.iter() {
        tracing::debug!(endpoint = %endpoint, wallets = ?wallets, "Monitoring wallets");
    }

    Ok(Arc::new(BalanceCollector::new(
        routes,
        Arc::new(HttpConnector),
        config.rpc.timeout(),
    )))
}

/// Bind the metrics listener.
pub async fn bind_listener(address: &str) -> Result<TcpListener, StartupError> {
    TcpListener::bind(address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.to_string(),
            source,
        })
}
