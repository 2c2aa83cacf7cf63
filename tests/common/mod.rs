//! Shared utilities for integration testing.

use alloy::primitives::U256;
use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use wallet_balance_exporter::blockchain::{BalanceClient, ConnectError, Connector, RpcBalanceClient};

/// A JSON-RPC node answering `eth_getBalance` from a fixed table.
#[derive(Clone)]
pub struct MockNode {
    pub addr: SocketAddr,
    calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockNode {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of JSON-RPC requests served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct NodeState {
    balances: Arc<HashMap<String, U256>>,
    calls: Arc<AtomicUsize>,
}

/// Start a mock node. Keys of `balances` are wallet addresses (any case).
pub async fn start_mock_node(balances: &[(&str, U256)]) -> MockNode {
    let balances = balances
        .iter()
        .map(|(wallet, raw)| (wallet.to_lowercase(), *raw))
        .collect();
    let calls = Arc::new(AtomicUsize::new(0));
    let state = NodeState {
        balances: Arc::new(balances),
        calls: Arc::clone(&calls),
    };

    let app = Router::new().route("/", post(rpc_handler)).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockNode { addr, calls }
}

async fn rpc_handler(State(state): State<NodeState>, Json(request): Json<Value>) -> Json<Value> {
    state.calls.fetch_add(1, Ordering::SeqCst);
    let id = request["id"].clone();

    if request["method"] != "eth_getBalance" {
        return Json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32601, "message": "method not found" }
        }));
    }

    let wallet = request["params"][0]
        .as_str()
        .unwrap_or_default()
        .to_lowercase();
    match state.balances.get(&wallet) {
        Some(raw) => Json(json!({ "jsonrpc": "2.0", "id": id, "result": raw })),
        None => Json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32000, "message": "account lookup failed" }
        })),
    }
}

/// `n` ETH in wei.
#[allow(dead_code)]
pub fn eth(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
}

/// Routes logical endpoints from a mapping to mock node URLs.
///
/// The mapping grammar cannot carry a `:port`, so tests name endpoints like
/// `http://node-a.test` and dial the mock node's real address instead.
/// Unknown endpoints are dialed as given.
#[allow(dead_code)]
pub struct NodeConnector {
    targets: HashMap<String, String>,
}

#[allow(dead_code)]
impl NodeConnector {
    pub fn new(targets: &[(&str, String)]) -> Self {
        Self {
            targets: targets
                .iter()
                .map(|(endpoint, url)| (endpoint.to_string(), url.clone()))
                .collect(),
        }
    }
}

#[async_trait::async_trait]
impl Connector for NodeConnector {
    async fn connect(&self, endpoint: &str) -> Result<Arc<dyn BalanceClient>, ConnectError> {
        let target = self
            .targets
            .get(endpoint)
            .map(String::as_str)
            .unwrap_or(endpoint);
        Ok(Arc::new(RpcBalanceClient::new(target)?))
    }
}
