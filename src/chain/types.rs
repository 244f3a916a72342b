//! Chain-side types and error definitions.

use alloy::primitives::B256;
use thiserror::Error;

/// A block header as delivered by the subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub number: u64,
    pub timestamp: u64,
    pub hash: B256,
}

/// Errors that can occur during chain access.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Could not establish or verify the RPC connection.
    #[error("chain connection failed: {0}")]
    Connection(String),

    /// An RPC call failed at the transport level.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// An RPC call exceeded the configured timeout.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The requested block does not exist on the connected chain.
    #[error("block {0} not found")]
    NotFound(u64),

    /// The chain returned a block missing required fields.
    #[error("block {number} is missing required fields")]
    IncompleteBlock { number: u64 },
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;
