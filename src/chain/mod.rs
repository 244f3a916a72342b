//! Chain access subsystem.
//!
//! # Data Flow
//! ```text
//! ChainConfig (network, endpoint)
//!     → client.rs (RPC connection, head polling, block fetches)
//!     → descriptor.rs (header → canonical BlockDescriptor)
//! ```
//!
//! The poller and the relay loop are decoupled by a bounded FIFO channel:
//! headers arrive in chain order and are consumed one at a time.

pub mod client;
pub mod descriptor;
pub mod types;

pub use client::{BlockSubscription, ChainClient, RpcChainClient};
pub use descriptor::BlockDescriptor;
pub use types::{BlockHeader, ChainError, ChainResult};
