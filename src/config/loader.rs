//! Configuration loading from disk and the environment.
//!
//! A TOML file is optional; the environment variables the deployment
//! scripts already set (`NODE_ENV`, `ANVIL_PORT`, `SEPOLIA_RPC_URL`, ...)
//! override whatever the file says.

use std::env;
use std::fs;
use std::path::Path;

use crate::config::schema::{Network, RelayConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Selects the network (`local` or `test`).
pub const NODE_ENV_VAR: &str = "NODE_ENV";
/// Local node port when running against Anvil.
pub const ANVIL_PORT_VAR: &str = "ANVIL_PORT";
/// RPC endpoint when running against Sepolia.
pub const SEPOLIA_RPC_URL_VAR: &str = "SEPOLIA_RPC_URL";
/// Destination process id on the ledger.
pub const PROCESS_ID_VAR: &str = "AO_PROCESS_ID";
/// Message-ingestion endpoint of the ledger.
pub const INGESTION_URL_VAR: &str = "AO_MU_URL";
/// Path to the signing keyfile.
pub const WALLET_FILE_VAR: &str = "WALLET_FILE";
/// Base URL of the proof-generation service.
pub const PROOF_API_URL_VAR: &str = "PROOF_API_URL";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, reason: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, reason } => write!(f, "Bad environment variable {}: {}", var, reason),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration.
///
/// Order: defaults, then the TOML file if given, then environment
/// overrides, then validation.
pub fn load_config(path: Option<&Path>) -> Result<RelayConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = fs::read_to_string(p).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => RelayConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn apply_env_overrides(config: &mut RelayConfig) -> Result<(), ConfigError> {
    if let Ok(value) = env::var(NODE_ENV_VAR) {
        config.chain.network = match value.as_str() {
            "local" => Network::Local,
            "test" => Network::Test,
            other => {
                return Err(ConfigError::Env {
                    var: NODE_ENV_VAR,
                    reason: format!("expected \"local\" or \"test\", got \"{}\"", other),
                })
            }
        };
    }
    if let Ok(value) = env::var(ANVIL_PORT_VAR) {
        config.chain.local_port = value.parse().map_err(|_| ConfigError::Env {
            var: ANVIL_PORT_VAR,
            reason: format!("not a valid port: \"{}\"", value),
        })?;
    }
    if let Ok(value) = env::var(SEPOLIA_RPC_URL_VAR) {
        config.chain.rpc_url = Some(value);
    }
    if let Ok(value) = env::var(PROCESS_ID_VAR) {
        config.ledger.process_id = value;
    }
    if let Ok(value) = env::var(INGESTION_URL_VAR) {
        config.ledger.ingestion_url = value;
    }
    if let Ok(value) = env::var(WALLET_FILE_VAR) {
        config.ledger.keyfile_path = value;
    }
    if let Ok(value) = env::var(PROOF_API_URL_VAR) {
        config.proof.base_url = value;
    }
    Ok(())
}
