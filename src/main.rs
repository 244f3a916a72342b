//! Relay oracle entry point.
//!
//! Startup is fail-fast: configuration, the chain connection, and the
//! signing credential must all be good before the subscription starts.
//! After that, per-block failures never bring the process down; only a
//! termination signal does, cleanly.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use a0_relay::chain::RpcChainClient;
use a0_relay::config::load_config;
use a0_relay::ledger::{LedgerSender, LedgerSigner};
use a0_relay::lifecycle::{signals, Shutdown};
use a0_relay::observability::{logging, metrics};
use a0_relay::oracle::{OracleConfig, RelayOracle, RelaySession};

#[derive(Parser)]
#[command(name = "a0-relay")]
#[command(about = "Chain-watching relay oracle for the A0 bridge", long_about = None)]
struct Args {
    /// Optional TOML config file; environment variables override it.
    #[arg(long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init("a0_relay=debug,info");

    let args = Args::parse();
    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Configuration rejected");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        network = ?config.chain.network,
        process = %config.ledger.process_id,
        "a0-relay v0.1.0 starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => {
                // Validation already vetted the address; this is unreachable
                // short of a race on the config file.
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    error = %e,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let client = match RpcChainClient::connect(&config.chain).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Chain connection failed");
            return ExitCode::FAILURE;
        }
    };

    let signer = match LedgerSigner::from_keyfile(Path::new(&config.ledger.keyfile_path)) {
        Ok(signer) => signer,
        Err(e) => {
            tracing::error!(error = %e, "Signing credential unavailable");
            return ExitCode::FAILURE;
        }
    };

    let sender = match LedgerSender::new(&config.ledger, signer) {
        Ok(sender) => sender,
        Err(e) => {
            tracing::error!(error = %e, "Ledger sender setup failed");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();
    tokio::spawn(signals::trigger_on_signal(shutdown.clone()));

    let session = RelaySession::new(client);
    let oracle = RelayOracle::new(
        session,
        sender,
        OracleConfig {
            process_id: config.ledger.process_id.clone(),
            retries: config.retries.clone(),
        },
    );

    match oracle.run(shutdown.subscribe()).await {
        Ok(stats) => {
            tracing::info!(
                relayed = stats.relayed,
                skipped = stats.skipped,
                "Shutdown complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Relay oracle failed");
            ExitCode::FAILURE
        }
    }
}
