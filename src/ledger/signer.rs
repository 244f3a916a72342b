//! Message signing from a local credential file.
//!
//! # Security
//! - The signing key is loaded once at startup, from a JSON keyfile
//! - Key material is never logged or serialized
//! - The credential is read-only shared state; it is never rotated
//!   during a run

use std::path::Path;

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;
use serde::Deserialize;

use crate::ledger::envelope::{MessageEnvelope, Tag};
use crate::ledger::types::{LedgerError, LedgerResult};

/// On-disk keyfile format.
#[derive(Deserialize)]
struct Keyfile {
    private_key: String,
}

/// An envelope signed and attributed to the relay's credential — the wire
/// form the ingestion endpoint accepts.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SignedMessage {
    pub process: String,
    pub tags: Vec<Tag>,
    pub data: String,
    /// Signer address, hex.
    pub owner: String,
    /// Signature over the canonical envelope JSON, hex.
    pub signature: String,
}

/// Signs outbound envelopes with the key loaded at startup.
#[derive(Clone)]
pub struct LedgerSigner {
    signer: PrivateKeySigner,
}

impl LedgerSigner {
    /// Load the signing credential from a JSON keyfile.
    ///
    /// Failure here is fatal at startup: without a credential the relay
    /// cannot author a single message.
    pub fn from_keyfile(path: &Path) -> LedgerResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            LedgerError::Signing(format!("cannot read keyfile {}: {}", path.display(), e))
        })?;
        let keyfile: Keyfile = serde_json::from_str(&raw)
            .map_err(|e| LedgerError::Signing(format!("malformed keyfile: {}", e)))?;
        Self::from_private_key(&keyfile.private_key)
    }

    /// Build a signer from a hex private key (0x prefix optional).
    pub fn from_private_key(private_key_hex: &str) -> LedgerResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| LedgerError::Signing(format!("invalid private key format: {}", e)))?;

        tracing::info!(address = %signer.address(), "Ledger signer initialized");

        Ok(Self { signer })
    }

    /// The address messages are attributed to.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign an envelope, producing the wire message.
    pub async fn sign(&self, envelope: &MessageEnvelope) -> LedgerResult<SignedMessage> {
        let canonical = serde_json::to_string(envelope)
            .map_err(|e| LedgerError::Signing(format!("envelope serialization failed: {}", e)))?;

        let signature = self
            .signer
            .sign_message(canonical.as_bytes())
            .await
            .map_err(|e| LedgerError::Signing(format!("signature failed: {}", e)))?;

        Ok(SignedMessage {
            process: envelope.process.clone(),
            tags: envelope.tags.clone(),
            data: envelope.data.clone(),
            owner: self.signer.address().to_string(),
            signature: format!("0x{}", alloy::hex::encode(signature.as_bytes())),
        })
    }
}

impl std::fmt::Debug for LedgerSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Deliberately omits the key material.
        f.debug_struct("LedgerSigner")
            .field("address", &self.signer.address())
            .finish()
    }
}
