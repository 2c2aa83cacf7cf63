//! Wallet balance exporter.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │             WALLET BALANCE EXPORTER          │
//!                    │                                              │
//!   RPC_URL_MAPPING  │  ┌─────────┐    ┌───────────────┐            │
//!   ─────────────────┼─▶│ routing │───▶│ RoutingTable  │            │
//!                    │  │ parser  │    │  (immutable)  │            │
//!                    │  └─────────┘    └───────┬───────┘            │
//!                    │                         │                    │
//!   GET /metrics     │  ┌─────────┐    ┌───────▼───────┐  ┌──────┐  │   eth_getBalance
//!   ─────────────────┼─▶│  http   │───▶│   collector   │─▶│ RPC  │──┼──────────────▶ RPC
//!                    │  │ server  │    │ (scrape lock) │  │ reg. │  │               nodes
//!   ◀────────────────┼──│         │◀───│               │◀─│      │◀─┼───────────────
//!   text exposition  │  └─────────┘    └───────────────┘  └──────┘  │
//!                    └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use wallet_balance_exporter::config::MAPPING_ENV_VAR;
use wallet_balance_exporter::lifecycle::startup::{
    bind_listener, build_collector, resolve_config, Overrides,
};
use wallet_balance_exporter::observability::{logging, metrics};
use wallet_balance_exporter::{HttpServer, Shutdown};

/// Export wallet balances from blockchain RPC endpoints as Prometheus metrics.
#[derive(Parser, Debug)]
#[command(name = "wallet-balance-exporter")]
#[command(version)]
struct Args {
    /// Endpoint → wallets mapping, e.g. `https://rpc.example:0xA,0xB|https://rpc2.example:0xC`.
    #[arg(long, env = MAPPING_ENV_VAR, hide_env_values = true)]
    rpc_url_mapping: Option<String>,

    /// Path to a TOML configuration file.
    #[arg(short, long, env = "EXPORTER_CONFIG")]
    config: Option<PathBuf>,

    /// HTTP listen address (overrides config).
    #[arg(long, env = "EXPORTER_LISTEN")]
    listen: Option<String>,

    /// Log level (overrides config).
    #[arg(long)]
    log_level: Option<String>,

    /// Run a single collection pass, print the exposition and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let overrides = Overrides {
        bind_address: args.listen.clone(),
        log_level: args.log_level.clone(),
    };
    let config = match resolve_config(args.config.as_deref(), overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("wallet-balance-exporter: {e}");
            return ExitCode::FAILURE;
        }
    };

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "wallet-balance-exporter starting");

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            ExitCode::FAILURE
        }
    }
}

async fn run(
    args: Args,
    config: wallet_balance_exporter::ExporterConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let collector = build_collector(&config, args.rpc_url_mapping.as_deref())?;

    if args.once {
        let outcome = collector.collect().await;
        print!("{}", metrics::render(&outcome.samples));
        return Ok(());
    }

    let listener = bind_listener(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        rpc_timeout_secs = config.rpc.timeout_secs,
        "Listening for scrapes"
    );

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    HttpServer::new(collector, &config.listener)
        .run(listener, shutdown.subscribe())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
