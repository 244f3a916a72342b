//! The relay oracle: chain events in, signed ledger messages out.
//!
//! # State Machine
//! ```text
//! Idle → Subscribed:    subscription registered; failure here is fatal
//! Subscribed:           blocks processed one at a time, in arrival order
//! Subscribed → Draining: termination signal; the block in flight finishes
//! Draining → Stopped:   subscription cancelled, handles released
//! ```
//!
//! # Retry Policy
//! Retryable delivery failures block forward progress on purpose: the same
//! descriptor is retried with exponential backoff until it lands or the
//! process is told to stop. Terminal failures (signing, schema rejection)
//! are logged once and the loop advances to the next block.

use tokio::sync::broadcast;

use crate::chain::client::ChainClient;
use crate::chain::descriptor::BlockDescriptor;
use crate::chain::types::{BlockHeader, ChainError};
use crate::config::schema::RetryConfig;
use crate::ledger::envelope::MessageEnvelope;
use crate::ledger::sender::LedgerSink;
use crate::ledger::types::LedgerError;
use crate::observability::metrics;
use crate::oracle::session::RelaySession;
use crate::resilience::delivery_backoff;

/// Lifecycle states of the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OracleState {
    Idle,
    Subscribed,
    Draining,
    Stopped,
}

/// Outcome of relaying a single block.
enum BlockOutcome {
    /// Descriptor delivered to the ledger.
    Relayed,
    /// Terminal failure; the block was logged and dropped.
    Skipped,
    /// Shutdown interrupted the retry loop before delivery.
    Interrupted,
}

/// Counters reported when the oracle stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    pub relayed: u64,
    pub skipped: u64,
}

/// Fatal oracle errors. Everything past startup is handled inside the
/// loop and never crashes the process.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("subscription failed: {0}")]
    Subscribe(#[from] ChainError),
}

/// Destination settings the oracle needs per message.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Destination process id on the ledger.
    pub process_id: String,
    /// Backoff tuning for retryable delivery failures.
    pub retries: RetryConfig,
}

/// The core orchestrator. Owns the session for its whole run.
pub struct RelayOracle<C, S> {
    session: RelaySession<C>,
    sink: S,
    config: OracleConfig,
    state: OracleState,
    stats: RelayStats,
}

impl<C: ChainClient, S: LedgerSink> RelayOracle<C, S> {
    pub fn new(session: RelaySession<C>, sink: S, config: OracleConfig) -> Self {
        Self {
            session,
            sink,
            config,
            state: OracleState::Idle,
            stats: RelayStats::default(),
        }
    }

    pub fn state(&self) -> OracleState {
        self.state
    }

    /// Run until the block source closes or shutdown is signalled.
    ///
    /// Returns the relay counters on a clean stop; the only error path is
    /// a failed subscription at startup.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> Result<RelayStats, OracleError> {
        self.session.open().await?;
        self.transition(OracleState::Subscribed);

        loop {
            let header = tokio::select! {
                biased;
                _ = shutdown.recv() => break,
                header = self.session.next_block() => match header {
                    Some(header) => header,
                    None => {
                        tracing::info!("Block source closed");
                        break;
                    }
                },
            };

            // From here the block runs to completion: shutdown only
            // interrupts between delivery attempts, never mid-send.
            match self.relay_block(header, &mut shutdown).await {
                BlockOutcome::Relayed => self.stats.relayed += 1,
                BlockOutcome::Skipped => self.stats.skipped += 1,
                BlockOutcome::Interrupted => break,
            }
        }

        self.transition(OracleState::Draining);
        self.session.close();
        self.transition(OracleState::Stopped);

        tracing::info!(
            relayed = self.stats.relayed,
            skipped = self.stats.skipped,
            "Relay oracle stopped"
        );
        Ok(self.stats)
    }

    /// Build and deliver one descriptor, honoring the retry policy.
    async fn relay_block(
        &mut self,
        header: BlockHeader,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> BlockOutcome {
        let descriptor = match self.build_descriptor(header).await {
            Ok(descriptor) => descriptor,
            Err(e) => {
                tracing::error!(block = header.number, error = %e, "Dropping block with unusable header");
                metrics::record_block_skipped("incomplete_block");
                return BlockOutcome::Skipped;
            }
        };

        let envelope = match MessageEnvelope::update_state(&self.config.process_id, &descriptor) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(block = descriptor.block_number, error = %e, "Dropping unserializable descriptor");
                metrics::record_block_skipped("serialization");
                return BlockOutcome::Skipped;
            }
        };

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.sink.deliver(envelope.clone()).await {
                Ok(receipt) => {
                    tracing::info!(
                        block = descriptor.block_number,
                        block_hash = %descriptor.block_hash,
                        message_id = %receipt.message_id,
                        "Block relayed"
                    );
                    metrics::record_block_relayed(&descriptor.network);
                    return BlockOutcome::Relayed;
                }
                Err(e) if e.is_retryable() => {
                    let delay = delivery_backoff(attempt, &self.config.retries);
                    tracing::warn!(
                        block = descriptor.block_number,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Delivery failed, retrying"
                    );
                    metrics::record_delivery_retry();
                    tokio::select! {
                        biased;
                        _ = shutdown.recv() => return BlockOutcome::Interrupted,
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                Err(e) => {
                    let reason = match e {
                        LedgerError::Signing(_) => "signing",
                        _ => "terminal_delivery",
                    };
                    tracing::error!(block = descriptor.block_number, error = %e, "Delivery rejected, skipping block");
                    metrics::record_block_skipped(reason);
                    return BlockOutcome::Skipped;
                }
            }
        }
    }

    /// Descriptor building, with a single refetch on an incomplete header.
    async fn build_descriptor(&self, header: BlockHeader) -> Result<BlockDescriptor, ChainError> {
        let network = self.session.client().network_id();
        match BlockDescriptor::from_header(network, &header) {
            Ok(descriptor) => Ok(descriptor),
            Err(ChainError::IncompleteBlock { number }) => {
                tracing::debug!(block = number, "Incomplete header, refetching once");
                let refreshed = self.session.client().block_by_number(number).await?;
                BlockDescriptor::from_header(network, &refreshed)
            }
            Err(e) => Err(e),
        }
    }

    fn transition(&mut self, next: OracleState) {
        tracing::debug!(from = ?self.state, to = ?next, "Oracle state change");
        self.state = next;
    }
}
