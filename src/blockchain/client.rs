//! Balance-query clients and the connectors that build them.
//!
//! # Responsibilities
//! - Define the `BalanceClient` capability (one handle per endpoint)
//! - Define the `Connector` seam used by the registry to dial endpoints
//! - Provide the alloy HTTP implementation of both
//!
//! # Design Decisions
//! - Dialing is lazy: the HTTP connector validates the URL and builds a
//!   provider, but no request is sent until the first balance query
//! - Wallet strings are validated here, at query time, not by the parser

use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::blockchain::types::{ConnectError, QueryError, QueryResult};

/// A reusable handle bound to exactly one RPC endpoint.
#[async_trait]
pub trait BalanceClient: Send + Sync + fmt::Debug {
    /// The endpoint this handle was dialed for.
    fn endpoint(&self) -> &str;

    /// Fetch the balance of `wallet` in the smallest unit, at the latest block.
    async fn balance_of(&self, wallet: &str) -> QueryResult<U256>;
}

/// Builds [`BalanceClient`] handles for endpoints.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, endpoint: &str) -> Result<Arc<dyn BalanceClient>, ConnectError>;
}

/// JSON-RPC over HTTP(S) through an alloy provider.
#[derive(Clone)]
pub struct RpcBalanceClient {
    endpoint: String,
    provider: Arc<dyn Provider + Send + Sync>,
}

impl RpcBalanceClient {
    /// Build a client for `endpoint`.
    ///
    /// Fails only if the URL cannot be parsed; reachability is not checked.
    pub fn new(endpoint: &str) -> Result<Self, ConnectError> {
        let url: url::Url = endpoint.parse().map_err(|e: url::ParseError| {
            ConnectError::InvalidUrl {
                url: endpoint.to_string(),
                reason: e.to_string(),
            }
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConnectError::Transport {
                url: endpoint.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        let provider = ProviderBuilder::new().connect_http(url);
        Ok(Self {
            endpoint: endpoint.to_string(),
            provider: Arc::new(provider),
        })
    }
}

#[async_trait]
impl BalanceClient for RpcBalanceClient {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn balance_of(&self, wallet: &str) -> QueryResult<U256> {
        let address = parse_address(wallet)?;
        self.provider
            .get_balance(address)
            .await
            .map_err(|e| QueryError::Rpc(e.to_string()))
    }
}

impl fmt::Debug for RpcBalanceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcBalanceClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Dials endpoints with [`RpcBalanceClient`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpConnector;

#[async_trait]
impl Connector for HttpConnector {
    async fn connect(&self, endpoint: &str) -> Result<Arc<dyn BalanceClient>, ConnectError> {
        let client = RpcBalanceClient::new(endpoint)?;
        Ok(Arc::new(client))
    }
}

/// Parse a configured wallet string into a chain address.
pub fn parse_address(wallet: &str) -> QueryResult<Address> {
    Address::from_str(wallet).map_err(|e| QueryError::InvalidAddress {
        address: wallet.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        let address = parse_address("0x00000000000000000000000000000000000000aa").unwrap();
        assert_eq!(address, Address::with_last_byte(0xaa));

        let err = parse_address("not-a-wallet").unwrap_err();
        assert!(matches!(err, QueryError::InvalidAddress { .. }));
        assert!(parse_address("").is_err());
    }

    #[tokio::test]
    async fn test_dial_is_lazy() {
        // Nothing listens here; building the client must still succeed.
        let client = HttpConnector.connect("http://127.0.0.1:1").await.unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:1");
    }

    #[tokio::test]
    async fn test_invalid_url_fails_to_dial() {
        let err = HttpConnector.connect("http://bad host/rpc").await.unwrap_err();
        assert!(matches!(err, ConnectError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_invalid_wallet_fails_before_network() {
        let client = RpcBalanceClient::new("http://127.0.0.1:1").unwrap();
        let err = client.balance_of("0x1234").await.unwrap_err();
        assert!(matches!(err, QueryError::InvalidAddress { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_fails_at_query_time() {
        let client = RpcBalanceClient::new("http://127.0.0.1:1").unwrap();
        let err = client
            .balance_of("0x00000000000000000000000000000000000000aa")
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::Rpc(_)));
    }
}
