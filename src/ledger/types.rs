//! Ledger-side types and error definitions.

use thiserror::Error;

/// Errors from signing or delivering a message to the destination ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The credential could not produce a signature for the payload.
    /// Terminal for the current message, never for the process.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Delivery failed in a way worth retrying: network fault, timeout,
    /// or an overloaded endpoint.
    #[error("delivery failed: {0}")]
    Retryable(String),

    /// The ledger rejected the message outright (schema or validation).
    #[error("delivery rejected: {0}")]
    Rejected(String),
}

impl LedgerError {
    /// Whether the orchestrator should retry the same message.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable(_))
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Acknowledgement returned by the ingestion endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Message id assigned by the ledger, empty if it returned none.
    pub message_id: String,
}
