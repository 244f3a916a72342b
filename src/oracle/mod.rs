//! The relay oracle subsystem.
//!
//! # Data Flow
//! ```text
//! BlockSubscription (bounded FIFO channel)
//!     → relay.rs (one block at a time: build → sign → send,
//!                 backoff retries, skip-and-log on terminal errors)
//!     → session.rs (owns the subscription and the chain client)
//! ```
//!
//! # Design Decisions
//! - Strictly sequential block processing: arrival order equals delivery
//!   order, and a failing block holds the line rather than being dropped
//! - Shutdown drains: the block in flight finishes before the process
//!   exits

pub mod relay;
pub mod session;

pub use relay::{OracleConfig, OracleError, OracleState, RelayOracle, RelayStats};
pub use session::RelaySession;
