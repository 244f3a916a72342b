//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits so the relay can be configured from a TOML
//! file, with environment variables layered on top (see `loader`).

use serde::{Deserialize, Serialize};

/// Which chain the relay watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Local development node (Anvil).
    #[default]
    Local,
    /// Sepolia test network.
    Test,
}

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Chain connection settings.
    pub chain: ChainConfig,

    /// Destination ledger settings.
    pub ledger: LedgerConfig,

    /// Proof-generation service settings.
    pub proof: ProofConfig,

    /// Delivery retry tuning.
    pub retries: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Chain connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Network selector (`local` or `test`).
    pub network: Network,

    /// RPC endpoint for the test network. Required when `network = "test"`.
    pub rpc_url: Option<String>,

    /// Local node port, used when `network = "local"`.
    pub local_port: u16,

    /// Timeout for individual RPC calls in seconds.
    pub rpc_timeout_secs: u64,

    /// Interval between chain-head polls in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            network: Network::Local,
            rpc_url: None,
            local_port: 8545,
            rpc_timeout_secs: 10,
            poll_interval_ms: 1000,
        }
    }
}

impl ChainConfig {
    /// Resolve the RPC endpoint for the selected network.
    ///
    /// `None` when the test network is selected without an RPC URL;
    /// validation reports that before any connection attempt.
    pub fn endpoint(&self) -> Option<String> {
        match self.network {
            Network::Local => Some(format!("http://127.0.0.1:{}", self.local_port)),
            Network::Test => self.rpc_url.clone(),
        }
    }
}

/// Destination ledger settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Destination process id on the ledger.
    pub process_id: String,

    /// Message-ingestion endpoint of the ledger.
    pub ingestion_url: String,

    /// Path to the JSON keyfile holding the signing key.
    pub keyfile_path: String,

    /// Timeout for delivery requests in seconds.
    pub request_timeout_secs: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            process_id: String::new(),
            ingestion_url: "https://mu.ao-testnet.xyz".to_string(),
            keyfile_path: "wallet.json".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Proof-generation service settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProofConfig {
    /// Base URL of the proof-generation endpoint.
    pub base_url: String,
}

impl Default for ProofConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Delivery retry tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// First retry delay in milliseconds.
    pub base_delay_ms: u64,

    /// Delay cap in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 1000,
            max_delay_ms: 30_000,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics exporter.
    pub metrics_enabled: bool,

    /// Address the metrics exporter binds to.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.chain.network, Network::Local);
        assert_eq!(config.chain.local_port, 8545);
        assert_eq!(config.chain.poll_interval_ms, 1000);
        assert_eq!(config.ledger.ingestion_url, "https://mu.ao-testnet.xyz");
        assert_eq!(config.retries.base_delay_ms, 1000);
        assert_eq!(config.retries.max_delay_ms, 30_000);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_local_endpoint_uses_port() {
        let config = ChainConfig {
            local_port: 9944,
            ..ChainConfig::default()
        };
        assert_eq!(config.endpoint().unwrap(), "http://127.0.0.1:9944");
    }

    #[test]
    fn test_test_endpoint_requires_rpc_url() {
        let config = ChainConfig {
            network: Network::Test,
            ..ChainConfig::default()
        };
        assert!(config.endpoint().is_none());

        let config = ChainConfig {
            network: Network::Test,
            rpc_url: Some("https://rpc.sepolia.org".to_string()),
            ..ChainConfig::default()
        };
        assert_eq!(config.endpoint().unwrap(), "https://rpc.sepolia.org");
    }

    #[test]
    fn test_network_parses_lowercase() {
        let config: ChainConfig = toml::from_str("network = \"test\"").unwrap();
        assert_eq!(config.network, Network::Test);
    }
}
