//! A0 bridge relay.
//!
//! Watches an EVM chain and mirrors block state to a message-based
//! destination ledger; also carries withdrawal proofs from an external
//! proof service to the same ledger.
//!
//! # Architecture Overview
//!
//! ```text
//!   EVM chain ──RPC──▶ chain (client, head poller, descriptor builder)
//!                          │  bounded FIFO channel
//!                          ▼
//!                      oracle (one block at a time, backoff retries)
//!                          │  MessageEnvelope
//!                          ▼
//!                      ledger (signer, sender) ──HTTP──▶ destination ledger
//!
//!   proof service ──HTTP──▶ proof (normalize, submit as Bridge message)
//! ```

// Core subsystems
pub mod chain;
pub mod config;
pub mod ledger;
pub mod oracle;
pub mod proof;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use chain::{BlockDescriptor, ChainClient, RpcChainClient};
pub use config::RelayConfig;
pub use ledger::{LedgerSender, LedgerSigner, LedgerSink, MessageEnvelope};
pub use lifecycle::Shutdown;
pub use oracle::{OracleConfig, RelayOracle, RelaySession};
