//! The balance collector.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::timeout;

use crate::blockchain::client::{BalanceClient, Connector};
use crate::blockchain::registry::ClientRegistry;
use crate::blockchain::types::{QueryError, QueryResult};
use crate::blockchain::units::to_display_units;
use crate::collector::sample::{BalanceSample, ScrapeFailure, ScrapeOutcome};
use crate::routing::RoutingTable;

/// Collects wallet balances for every entry of a [`RoutingTable`].
///
/// Built once at startup and shared behind an `Arc` by the HTTP handler.
/// At most one [`collect`](Self::collect) runs at a time: a concurrent
/// scrape waits until the running pass has finished, so an endpoint is
/// never dialed twice concurrently and outbound RPC load stays bounded.
pub struct BalanceCollector {
    routes: RoutingTable,
    query_timeout: Duration,
    /// Scrape lock. Owns the client cache so the cache is only touched
    /// while a pass holds the lock.
    registry: Mutex<ClientRegistry>,
}

impl BalanceCollector {
    pub fn new(routes: RoutingTable, connector: Arc<dyn Connector>, query_timeout: Duration) -> Self {
        Self {
            routes,
            query_timeout,
            registry: Mutex::new(ClientRegistry::new(connector)),
        }
    }

    pub fn routes(&self) -> &RoutingTable {
        &self.routes
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Number of endpoints with a cached client.
    pub async fn connected_endpoints(&self) -> usize {
        self.registry.lock().await.len()
    }

    /// Run one collection pass.
    ///
    /// Never fails: dial errors skip the endpoint, query errors skip the
    /// wallet, and both are logged and reported in the outcome.
    pub async fn collect(&self) -> ScrapeOutcome {
        let mut registry = self.registry.lock().await;
        let started_at = Instant::now();
        let mut samples = Vec::with_capacity(self.routes.wallet_count());
        let mut failures = Vec::new();

        for (endpoint, wallets) in self.routes.iter() {
            let client = match registry.get_or_create(endpoint).await {
                Ok(client) => client,
                Err(error) => {
                    tracing::warn!(
                        endpoint = %endpoint,
                        wallets = wallets.len(),
                        error = %error,
                        "Error connecting to RPC endpoint, skipping its wallets"
                    );
                    failures.push(ScrapeFailure::Connect {
                        endpoint: endpoint.to_string(),
                        error,
                    });
                    continue;
                }
            };

            for wallet in wallets {
                match self.fetch(endpoint, client.as_ref(), wallet).await {
                    Ok(sample) => samples.push(sample),
                    Err(error) => {
                        tracing::warn!(
                            endpoint = %endpoint,
                            wallet = %wallet,
                            error = %error,
                            "Error retrieving wallet balance"
                        );
                        failures.push(ScrapeFailure::Query {
                            endpoint: endpoint.to_string(),
                            wallet: wallet.clone(),
                            error,
                        });
                    }
                }
            }
        }

        let outcome = ScrapeOutcome {
            samples,
            failures,
            started_at,
            finished_at: Instant::now(),
        };
        drop(registry);

        tracing::debug!(
            samples = outcome.samples.len(),
            failures = outcome.failures.len(),
            elapsed_ms = outcome.elapsed().as_millis() as u64,
            "Balance collection finished"
        );
        outcome
    }

    async fn fetch(
        &self,
        endpoint: &str,
        client: &dyn BalanceClient,
        wallet: &str,
    ) -> QueryResult<BalanceSample> {
        let raw = match timeout(self.query_timeout, client.balance_of(wallet)).await {
            Ok(result) => result?,
            Err(_) => return Err(QueryError::Timeout(self.query_timeout)),
        };
        let value = to_display_units(raw)?;

        Ok(BalanceSample {
            endpoint: endpoint.to_string(),
            wallet: wallet.to_string(),
            raw,
            value,
        })
    }
}

impl std::fmt::Debug for BalanceCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BalanceCollector")
            .field("endpoints", &self.routes.endpoint_count())
            .field("wallets", &self.routes.wallet_count())
            .field("query_timeout", &self.query_timeout)
            .finish()
    }
}
