//! Proof pipeline error definitions.

use thiserror::Error;

use crate::ledger::types::LedgerError;

/// Errors from the proof pipeline.
#[derive(Debug, Error)]
pub enum ProofError {
    /// The submission failed local validation; nothing was sent.
    #[error("invalid proof submission: {0}")]
    InvalidProof(String),

    /// The proof service reported a failure.
    #[error("proof service error: {0}")]
    Service(String),

    /// Could not reach the proof service.
    #[error("proof service request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Delivery to the destination ledger failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Result type for proof operations.
pub type ProofResult<T> = Result<T, ProofError>;
