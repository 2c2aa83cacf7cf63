//! Wallet balance exporter library.
//!
//! Queries blockchain JSON-RPC endpoints for wallet balances on every
//! Prometheus scrape and exposes them as the `wallet_balance_eth` gauge.

pub mod blockchain;
pub mod collector;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use collector::BalanceCollector;
pub use config::ExporterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{parse_mapping, RoutingTable};
