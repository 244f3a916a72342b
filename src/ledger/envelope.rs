//! Message envelopes for the destination ledger.
//!
//! An envelope is the unit the ledger ingests: the destination process,
//! an `Action` tag telling the process what to do with it, and a JSON
//! payload. Envelopes are constructed fresh per send and never reused.

use serde::{Deserialize, Serialize};

use crate::chain::descriptor::BlockDescriptor;
use crate::ledger::types::LedgerError;
use crate::proof::submission::ProofSubmission;

/// Action tag value for block descriptor updates.
pub const ACTION_UPDATE_STATE: &str = "updateState";
/// Action tag value for proof submissions.
pub const ACTION_BRIDGE: &str = "Bridge";

/// A name/value pair attached to a ledger message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    /// The `Action` tag the destination process dispatches on.
    pub fn action(value: &str) -> Self {
        Self {
            name: "Action".to_string(),
            value: value.to_string(),
        }
    }
}

/// The unit sent to the destination ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEnvelope {
    /// Destination process id.
    pub process: String,
    /// Message tags; always carries exactly one `Action` tag here.
    pub tags: Vec<Tag>,
    /// JSON payload.
    pub data: String,
}

impl MessageEnvelope {
    /// Envelope carrying a block descriptor, tagged `updateState`.
    pub fn update_state(process: &str, descriptor: &BlockDescriptor) -> Result<Self, LedgerError> {
        let data = serde_json::to_string(descriptor)
            .map_err(|e| LedgerError::Rejected(format!("descriptor serialization failed: {}", e)))?;
        Ok(Self {
            process: process.to_string(),
            tags: vec![Tag::action(ACTION_UPDATE_STATE)],
            data,
        })
    }

    /// Envelope carrying a proof submission, tagged `Bridge`.
    pub fn bridge(process: &str, submission: &ProofSubmission) -> Result<Self, LedgerError> {
        let data = serde_json::to_string(submission)
            .map_err(|e| LedgerError::Rejected(format!("submission serialization failed: {}", e)))?;
        Ok(Self {
            process: process.to_string(),
            tags: vec![Tag::action(ACTION_BRIDGE)],
            data,
        })
    }

    /// Value of the `Action` tag, if present.
    pub fn action(&self) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.name == "Action")
            .map(|tag| tag.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::types::BlockHeader;
    use alloy::primitives::B256;

    fn descriptor() -> BlockDescriptor {
        let header = BlockHeader {
            number: 5,
            timestamp: 1700000000,
            hash: B256::repeat_byte(0xcc),
        };
        BlockDescriptor::from_header("11155111", &header).unwrap()
    }

    #[test]
    fn test_update_state_envelope() {
        let envelope = MessageEnvelope::update_state("proc-1", &descriptor()).unwrap();
        assert_eq!(envelope.process, "proc-1");
        assert_eq!(envelope.action(), Some(ACTION_UPDATE_STATE));

        let payload: serde_json::Value = serde_json::from_str(&envelope.data).unwrap();
        assert_eq!(payload["blockNumber"], 5);
        assert_eq!(payload["network"], "11155111");
    }

    #[test]
    fn test_bridge_envelope() {
        let submission = ProofSubmission {
            withdraw: "0xabc".to_string(),
            receipt: serde_json::json!({"x": 1}),
        };
        let envelope = MessageEnvelope::bridge("proc-1", &submission).unwrap();
        assert_eq!(envelope.action(), Some(ACTION_BRIDGE));

        let payload: serde_json::Value = serde_json::from_str(&envelope.data).unwrap();
        assert_eq!(payload["withdraw"], "0xabc");
        assert_eq!(payload["receipt"]["x"], 1);
    }

    #[test]
    fn test_exactly_one_action_tag() {
        let envelope = MessageEnvelope::update_state("proc-1", &descriptor()).unwrap();
        assert_eq!(envelope.tags.len(), 1);
        assert_eq!(envelope.tags[0].name, "Action");
    }
}
