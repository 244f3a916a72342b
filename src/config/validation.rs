//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check cross-field requirements (test network needs an RPC URL)
//! - Validate value ranges and URL/address syntax
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::{Network, RelayConfig};

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the full configuration, returning every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.chain.network == Network::Test
        && config.chain.rpc_url.as_deref().map_or(true, str::is_empty)
    {
        errors.push(ValidationError {
            field: "chain.rpc_url",
            message: "required when network = \"test\"".to_string(),
        });
    }
    if config.chain.local_port == 0 {
        errors.push(ValidationError {
            field: "chain.local_port",
            message: "must be a valid port".to_string(),
        });
    }
    if config.chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "chain.rpc_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }
    if config.chain.poll_interval_ms == 0 {
        errors.push(ValidationError {
            field: "chain.poll_interval_ms",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.ledger.process_id.is_empty() {
        errors.push(ValidationError {
            field: "ledger.process_id",
            message: "destination process id is required".to_string(),
        });
    }
    if let Err(e) = config.ledger.ingestion_url.parse::<url::Url>() {
        errors.push(ValidationError {
            field: "ledger.ingestion_url",
            message: format!("not a valid URL: {}", e),
        });
    }
    if config.ledger.keyfile_path.is_empty() {
        errors.push(ValidationError {
            field: "ledger.keyfile_path",
            message: "signing keyfile path is required".to_string(),
        });
    }
    if config.ledger.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "ledger.request_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if let Err(e) = config.proof.base_url.parse::<url::Url>() {
        errors.push(ValidationError {
            field: "proof.base_url",
            message: format!("not a valid URL: {}", e),
        });
    }

    if config.retries.base_delay_ms == 0 {
        errors.push(ValidationError {
            field: "retries.base_delay_ms",
            message: "must be greater than zero".to_string(),
        });
    }
    if config.retries.max_delay_ms < config.retries.base_delay_ms {
        errors.push(ValidationError {
            field: "retries.max_delay_ms",
            message: "must not be below retries.base_delay_ms".to_string(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address",
            message: "not a valid socket address".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
