//! Endpoint → wallet routing table.

use std::collections::BTreeMap;

/// Immutable mapping from RPC endpoint URL to the wallets queried through it.
///
/// Wallet lists keep the order, duplicates and empty entries of the input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingTable {
    routes: BTreeMap<String, Vec<String>>,
}

impl RoutingTable {
    pub(crate) fn new(routes: BTreeMap<String, Vec<String>>) -> Self {
        Self { routes }
    }

    /// Wallets configured for `endpoint`, if the endpoint is known.
    pub fn wallets(&self, endpoint: &str) -> Option<&[String]> {
        self.routes.get(endpoint).map(Vec::as_slice)
    }

    /// Iterate over `(endpoint, wallets)` pairs.
    ///
    /// Callers must not rely on the iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.routes
            .iter()
            .map(|(endpoint, wallets)| (endpoint.as_str(), wallets.as_slice()))
    }

    /// Iterate over the configured endpoints.
    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Number of distinct endpoints.
    pub fn endpoint_count(&self) -> usize {
        self.routes.len()
    }

    /// Total number of wallet entries across all endpoints.
    pub fn wallet_count(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
