//! Prometheus text exposition of balance samples.
//!
//! # Metrics
//! - `wallet_balance_eth` (gauge): balance of a wallet in ETH, label `wallet`
//!
//! # Design Decisions
//! - Each scrape renders through its own `PrometheusRecorder`, installed as
//!   a local recorder for the duration of the render. The global recorder
//!   is never touched, so a wallet that failed this scrape has no series.
//! - One series per `wallet` label. When a wallet is configured more than
//!   once (same address under two endpoints, or twice under one), the first
//!   sample of the pass wins and every later one is logged and dropped. The
//!   collector walks endpoints in ascending URL order, so the winner is the
//!   lexicographically smallest endpoint.

use metrics::{describe_gauge, gauge, with_local_recorder};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::collections::HashMap;

use crate::collector::BalanceSample;

/// Name of the exported gauge family.
pub const WALLET_BALANCE_METRIC: &str = "wallet_balance_eth";

/// Help text of the exported gauge family.
pub const WALLET_BALANCE_HELP: &str = "Balance of the specified wallet in ETH";

/// Label carrying the wallet address.
pub const WALLET_LABEL: &str = "wallet";

/// Content type of the text exposition format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// A sample dropped because an earlier sample already used its wallet label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCollision<'a> {
    pub wallet: &'a str,
    /// Endpoint of the sample that was kept.
    pub kept_endpoint: &'a str,
    /// Endpoint of the sample that was dropped.
    pub dropped_endpoint: &'a str,
}

/// Keep the first sample per wallet label, in input order.
pub fn dedup_by_wallet(
    samples: &[BalanceSample],
) -> (Vec<&BalanceSample>, Vec<LabelCollision<'_>>) {
    let mut seen: HashMap<&str, &str> = HashMap::with_capacity(samples.len());
    let mut kept = Vec::with_capacity(samples.len());
    let mut collisions = Vec::new();

    for sample in samples {
        match seen.get(sample.wallet.as_str()) {
            Some(&kept_endpoint) => collisions.push(LabelCollision {
                wallet: &sample.wallet,
                kept_endpoint,
                dropped_endpoint: &sample.endpoint,
            }),
            None => {
                seen.insert(&sample.wallet, &sample.endpoint);
                kept.push(sample);
            }
        }
    }

    (kept, collisions)
}

/// Render `samples` in the Prometheus text exposition format.
pub fn render(samples: &[BalanceSample]) -> String {
    let (kept, collisions) = dedup_by_wallet(samples);
    for collision in &collisions {
        tracing::warn!(
            wallet = %collision.wallet,
            kept_endpoint = %collision.kept_endpoint,
            dropped_endpoint = %collision.dropped_endpoint,
            "Wallet configured more than once, exposing first balance only"
        );
    }

    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    with_local_recorder(&recorder, || {
        describe_gauge!(WALLET_BALANCE_METRIC, WALLET_BALANCE_HELP);
        for sample in kept {
            gauge!(WALLET_BALANCE_METRIC, WALLET_LABEL => sample.wallet.clone()).set(sample.value);
        }
    });

    handle.render()
}
