//! Error definitions for the RPC capability.

use std::time::Duration;
use thiserror::Error;

/// Failure to build a client for an endpoint.
///
/// Scoped to one endpoint for one scrape; the dial is retried next scrape.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The endpoint is not a usable URL.
    #[error("invalid RPC URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The transport refused to build a client.
    #[error("transport error for '{url}': {reason}")]
    Transport { url: String, reason: String },
}

/// Failure to fetch one wallet's balance.
///
/// Scoped to one address for one scrape.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The wallet string is not a valid chain address.
    #[error("invalid wallet address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The RPC call failed (network, node error, malformed response).
    #[error("RPC error: {0}")]
    Rpc(String),

    /// The RPC call did not complete in time.
    #[error("RPC timeout after {0:?}")]
    Timeout(Duration),

    /// The returned balance could not be scaled to display units.
    #[error("balance conversion failed for {raw} wei: {reason}")]
    Conversion { raw: String, reason: String },
}

/// Result type for balance queries.
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QueryError::Timeout(Duration::from_secs(10));
        assert_eq!(err.to_string(), "RPC timeout after 10s");

        let err = ConnectError::InvalidUrl {
            url: "http://bad host".into(),
            reason: "invalid domain character".into(),
        };
        assert!(err.to_string().contains("http://bad host"));

        let err = QueryError::InvalidAddress {
            address: "0xZZ".into(),
            reason: "odd number of digits".into(),
        };
        assert!(err.to_string().starts_with("invalid wallet address '0xZZ'"));
    }
}
