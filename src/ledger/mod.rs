//! Destination ledger subsystem.
//!
//! # Data Flow
//! ```text
//! Keyfile (signing credential, loaded once)
//!     → signer.rs (envelope → signed wire message)
//!     → sender.rs (POST to the ingestion endpoint,
//!                  retryable vs terminal classification)
//! ```
//!
//! # Security Constraints
//! - The signing key comes only from the local keyfile
//! - Key material is never logged

pub mod envelope;
pub mod sender;
pub mod signer;
pub mod types;

pub use envelope::{MessageEnvelope, Tag, ACTION_BRIDGE, ACTION_UPDATE_STATE};
pub use sender::{LedgerSender, LedgerSink};
pub use signer::{LedgerSigner, SignedMessage};
pub use types::{DeliveryReceipt, LedgerError, LedgerResult};
