//! Per-scrape results.

use alloy::primitives::U256;
use std::time::{Duration, Instant};

use crate::blockchain::types::{ConnectError, QueryError};

/// One wallet balance observed during a scrape.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSample {
    /// Endpoint the balance was fetched from.
    pub endpoint: String,
    /// Wallet address as configured; used as the `wallet` label.
    pub wallet: String,
    /// Balance in the smallest unit.
    pub raw: U256,
    /// Balance in display units.
    pub value: f64,
}

/// A recoverable failure that removed wallets from a scrape.
#[derive(Debug)]
pub enum ScrapeFailure {
    /// The endpoint could not be dialed; none of its wallets were queried.
    Connect {
        endpoint: String,
        error: ConnectError,
    },
    /// One wallet's balance could not be fetched.
    Query {
        endpoint: String,
        wallet: String,
        error: QueryError,
    },
}

impl ScrapeFailure {
    pub fn endpoint(&self) -> &str {
        match self {
            ScrapeFailure::Connect { endpoint, .. } | ScrapeFailure::Query { endpoint, .. } => {
                endpoint
            }
        }
    }
}

/// Everything one `collect()` pass produced.
#[derive(Debug)]
pub struct ScrapeOutcome {
    pub samples: Vec<BalanceSample>,
    pub failures: Vec<ScrapeFailure>,
    /// When the pass acquired the scrape lock.
    pub started_at: Instant,
    /// When the pass finished walking the routing table.
    pub finished_at: Instant,
}

impl ScrapeOutcome {
    pub fn elapsed(&self) -> Duration {
        self.finished_at.saturating_duration_since(self.started_at)
    }
}
