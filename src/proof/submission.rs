//! Proof submission normalization.
//!
//! Receipts reach the bridge in two shapes: a JSON-encoded string that
//! carries its own withdrawal address, or the proof service's structured
//! `Ok` wrapper paired with an externally held address. Both normalize to
//! the same submission record before anything touches the network; a
//! submission missing either field is rejected locally.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::proof::types::ProofError;

/// A receipt as it arrived, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofPayload {
    /// JSON-encoded string of the form
    /// `{"withdraw": ..., "receipt": "<json string>"}`.
    RawString(String),
    /// Structured receipt out of the proof service's `Ok` wrapper; the
    /// withdrawal address is supplied separately.
    Structured { receipt: Value },
}

/// Canonical payload of a `Bridge` message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofSubmission {
    pub withdraw: String,
    pub receipt: Value,
}

/// Normalize either payload shape into a submission record.
///
/// `withdraw` is the externally held address, used only for the
/// structured shape; the raw-string shape carries its own.
pub fn normalize(payload: ProofPayload, withdraw: Option<&str>) -> Result<ProofSubmission, ProofError> {
    match payload {
        ProofPayload::RawString(raw) => {
            let parsed: Value = serde_json::from_str(&raw)
                .map_err(|e| ProofError::InvalidProof(format!("submission is not valid JSON: {}", e)))?;
            let withdraw = parsed
                .get("withdraw")
                .and_then(Value::as_str)
                .filter(|w| !w.is_empty())
                .ok_or_else(|| ProofError::InvalidProof("missing withdrawal address".to_string()))?
                .to_string();
            let receipt = parsed
                .get("receipt")
                .cloned()
                .ok_or_else(|| ProofError::InvalidProof("missing receipt".to_string()))?;
            Ok(ProofSubmission {
                withdraw,
                receipt: unwrap_receipt(receipt)?,
            })
        }
        ProofPayload::Structured { receipt } => {
            let withdraw = withdraw
                .filter(|w| !w.is_empty())
                .ok_or_else(|| ProofError::InvalidProof("missing withdrawal address".to_string()))?
                .to_string();
            Ok(ProofSubmission {
                withdraw,
                receipt: unwrap_receipt(receipt)?,
            })
        }
    }
}

/// String receipts carry one more JSON layer; unwrap it.
fn unwrap_receipt(receipt: Value) -> Result<Value, ProofError> {
    match receipt {
        Value::Null => Err(ProofError::InvalidProof("missing receipt".to_string())),
        Value::String(inner) => serde_json::from_str(&inner)
            .map_err(|e| ProofError::InvalidProof(format!("receipt is not valid JSON: {}", e))),
        other => Ok(other),
    }
}
