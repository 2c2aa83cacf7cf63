//! In-memory RPC doubles for unit tests.

use alloy::primitives::U256;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::blockchain::client::{BalanceClient, Connector};
use crate::blockchain::types::{ConnectError, QueryError, QueryResult};

/// Connector that hands out [`FakeClient`]s and counts dials per endpoint.
#[derive(Default)]
pub struct FakeConnector {
    balances: HashMap<String, U256>,
    refused: HashSet<String>,
    delay: Duration,
    dials: Mutex<HashMap<String, usize>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `raw` wei for `wallet` on every endpoint.
    pub fn with_balance(mut self, wallet: &str, raw: U256) -> Self {
        self.balances.insert(wallet.to_string(), raw);
        self
    }

    /// Fail every dial to `endpoint`.
    pub fn refuse(mut self, endpoint: &str) -> Self {
        self.refused.insert(endpoint.to_string());
        self
    }

    /// Make each balance query take `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn dials(&self, endpoint: &str) -> usize {
        self.dials
            .lock()
            .unwrap()
            .get(endpoint)
            .copied()
            .unwrap_or(0)
    }

    /// Highest number of balance queries observed running at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(&self, endpoint: &str) -> Result<Arc<dyn BalanceClient>, ConnectError> {
        *self
            .dials
            .lock()
            .unwrap()
            .entry(endpoint.to_string())
            .or_default() += 1;

        if self.refused.contains(endpoint) {
            return Err(ConnectError::Transport {
                url: endpoint.to_string(),
                reason: "connection refused".to_string(),
            });
        }

        Ok(Arc::new(FakeClient {
            endpoint: endpoint.to_string(),
            balances: self.balances.clone(),
            delay: self.delay,
            in_flight: Arc::clone(&self.in_flight),
            max_in_flight: Arc::clone(&self.max_in_flight),
        }))
    }
}

/// Client answering from a fixed balance table; unknown wallets fail.
#[derive(Debug)]
pub struct FakeClient {
    endpoint: String,
    balances: HashMap<String, U256>,
    delay: Duration,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

#[async_trait]
impl BalanceClient for FakeClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn balance_of(&self, wallet: &str) -> QueryResult<U256> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.balances
            .get(wallet)
            .copied()
            .ok_or_else(|| QueryError::Rpc(format!("unknown account {wallet}")))
    }
}
