//! Proof pipeline subsystem (withdrawal authorization).
//!
//! # Data Flow
//! ```text
//! Wallet address
//!     → client.rs (GET /generate/{address} on the proof service)
//!     → submission.rs (dual-shape receipt → canonical ProofSubmission)
//!     → ledger sender (`Bridge` message to the destination process)
//! ```
//!
//! # Design Decisions
//! - Validation before delivery: an incomplete submission never leaves
//!   the process
//! - No automatic retry; failures surface to the initiating caller

pub mod client;
pub mod pipeline;
pub mod submission;
pub mod types;

pub use client::ProofClient;
pub use pipeline::submit_proof;
pub use submission::{normalize, ProofPayload, ProofSubmission};
pub use types::{ProofError, ProofResult};
