//! Scrape-time balance collection.
//!
//! # Data Flow
//! ```text
//! GET /metrics
//!     → balance.rs (take scrape lock, walk the routing table)
//!         → blockchain::registry (client per endpoint)
//!         → blockchain::client (balance per wallet, bounded by timeout)
//!         → blockchain::units (wei → ETH)
//!     → sample.rs (BalanceSample / ScrapeFailure per wallet)
//!     → observability::metrics (text exposition)
//! ```
//!
//! # Design Decisions
//! - One coarse lock serializes whole scrapes and guards the client cache
//! - Failures are isolated per endpoint (dial) and per wallet (query)
//! - Failed wallets produce no sample; there is no error metric

pub mod balance;
pub mod sample;

pub use balance::BalanceCollector;
pub use sample::{BalanceSample, ScrapeFailure, ScrapeOutcome};
