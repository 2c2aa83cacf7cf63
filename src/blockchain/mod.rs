//! Blockchain RPC capability.
//!
//! # Data Flow
//! ```text
//! Endpoint URL (from the routing table)
//!     → registry.rs (cache hit, or dial through a Connector)
//!     → client.rs (alloy HTTP provider, eth_getBalance)
//!     → units.rs (wei → ETH)
//! ```
//!
//! # Design Decisions
//! - One client per endpoint, created on first use, never recreated
//! - Dial failures are not cached; the next scrape dials again
//! - Wallet addresses are validated when queried, not when configured

pub mod client;
pub mod registry;
pub mod types;
pub mod units;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{BalanceClient, Connector, HttpConnector, RpcBalanceClient};
pub use registry::ClientRegistry;
pub use types::{ConnectError, QueryError, QueryResult};
