//! Operator CLI for the A0 bridge relay.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use a0_relay::chain::{BlockDescriptor, ChainClient, RpcChainClient};
use a0_relay::config::load_config;
use a0_relay::ledger::{LedgerSender, LedgerSigner};
use a0_relay::observability::logging;
use a0_relay::proof::{submit_proof, ProofClient};

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Operator CLI for the A0 bridge relay", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables override it.
    #[arg(long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the chain head as a canonical block descriptor
    Head,
    /// Fetch a receipt for an address and submit it to the ledger
    SubmitProof {
        /// Wallet address the withdrawal is bound to
        address: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("a0_relay=info,warn");

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Head => {
            let client = RpcChainClient::connect(&config.chain).await?;
            let head = client.head_number().await?;
            let header = client.block_by_number(head).await?;
            let descriptor = BlockDescriptor::from_header(client.network_id(), &header)?;
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
        }
        Commands::SubmitProof { address } => {
            let signer = LedgerSigner::from_keyfile(Path::new(&config.ledger.keyfile_path))?;
            let sender = LedgerSender::new(&config.ledger, signer)?;
            let proof_client = ProofClient::new(&config.proof)?;

            let receipt =
                submit_proof(&proof_client, &sender, &config.ledger.process_id, &address).await?;
            println!("submitted: message id {}", receipt.message_id);
        }
    }

    Ok(())
}
