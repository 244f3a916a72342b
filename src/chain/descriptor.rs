//! Canonical block descriptors.

use alloy::primitives::B256;
use serde::{Deserialize, Serialize};

use crate::chain::types::{BlockHeader, ChainError};

/// Canonical summary of a chain block, relayed to the destination ledger.
///
/// Field names serialize to the wire keys the destination process consumes
/// (`network`, `blockNumber`, `timestamp`, `blockHash`). Created once per
/// observed block and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDescriptor {
    /// Chain identity as a decimal string.
    pub network: String,
    pub block_number: u64,
    pub timestamp: u64,
    pub block_hash: B256,
}

impl BlockDescriptor {
    /// Build a descriptor from a subscription header.
    ///
    /// Fails with [`ChainError::IncompleteBlock`] when the chain handed
    /// back a degenerate header: a zero hash, or a zero timestamp past
    /// genesis. The caller treats that as transient and refetches once.
    pub fn from_header(network: &str, header: &BlockHeader) -> Result<Self, ChainError> {
        if header.hash == B256::ZERO || (header.timestamp == 0 && header.number != 0) {
            return Err(ChainError::IncompleteBlock {
                number: header.number,
            });
        }
        Ok(Self {
            network: network.to_string(),
            block_number: header.number,
            timestamp: header.timestamp,
            block_hash: header.hash,
        })
    }
}
