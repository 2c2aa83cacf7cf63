//! Per-endpoint client cache.
//!
//! # Responsibilities
//! - Dial each endpoint at most once per successful connection
//! - Hand out the cached handle on every later request
//! - Leave failed dials uncached so the next scrape retries them
//!
//! # Design Decisions
//! - Not internally synchronized: the owner serializes access (the
//!   collector keeps it behind its single scrape lock)
//! - Entries are never evicted; configuration is static for the process

use std::collections::HashMap;
use std::sync::Arc;

use crate::blockchain::client::{BalanceClient, Connector};
use crate::blockchain::types::ConnectError;

/// Lazily populated cache of one [`BalanceClient`] per endpoint.
pub struct ClientRegistry {
    connector: Arc<dyn Connector>,
    clients: HashMap<String, Arc<dyn BalanceClient>>,
}

impl ClientRegistry {
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            clients: HashMap::new(),
        }
    }

    /// Return the cached handle for `endpoint`, dialing it on first use.
    pub async fn get_or_create(
        &mut self,
        endpoint: &str,
    ) -> Result<Arc<dyn BalanceClient>, ConnectError> {
        if let Some(client) = self.clients.get(endpoint) {
            return Ok(Arc::clone(client));
        }

        let client = self.connector.connect(endpoint).await?;
        self.clients.insert(endpoint.to_string(), Arc::clone(&client));
        tracing::info!(endpoint = %endpoint, "Connected to RPC endpoint");
        Ok(client)
    }

    /// Whether a handle for `endpoint` is cached.
    pub fn contains(&self, endpoint: &str) -> bool {
        self.clients.contains_key(endpoint)
    }

    /// Number of cached handles.
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl std::fmt::Debug for ClientRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientRegistry")
            .field("endpoints", &self.clients.keys().collect::<Vec<_>>())
            .finish()
    }
}
