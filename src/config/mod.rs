//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! Defaults (schema.rs)
//!     → optional TOML file (loader.rs)
//!     → environment overrides: NODE_ENV, ANVIL_PORT, SEPOLIA_RPC_URL, ...
//!     → validation.rs (all errors collected, fatal at startup)
//! ```
//!
//! # Design Decisions
//! - Environment wins over file: deployments set NODE_ENV et al. directly
//! - Validation runs once at startup; a bad config never reaches the oracle

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ChainConfig, LedgerConfig, Network, ObservabilityConfig, ProofConfig, RelayConfig, RetryConfig};
