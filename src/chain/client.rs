//! Chain RPC client and block subscription.
//!
//! # Responsibilities
//! - Connect to the JSON-RPC endpoint for the selected network
//! - Fetch block headers by number, with timeouts on every call
//! - Watch the chain head and deliver new headers in order
//!
//! Headers flow through a bounded FIFO channel so the relay loop can
//! consume them one at a time regardless of how fast the chain produces
//! blocks. Transport faults inside the poller are logged and polling
//! continues; reconnection is not this layer's job.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use alloy::eips::BlockNumberOrTag;
use alloy::providers::{Provider, ProviderBuilder};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::chain::types::{BlockHeader, ChainError, ChainResult};
use crate::config::schema::ChainConfig;

/// Capacity of the header channel between the poller and the relay loop.
const HEADER_CHANNEL_CAPACITY: usize = 64;

/// Access to an EVM chain: block fetches plus a new-head subscription.
///
/// The relay loop is generic over this so tests can script a chain
/// without a network.
pub trait ChainClient {
    /// Chain identity as a decimal string, used in relayed descriptors.
    fn network_id(&self) -> &str;

    /// Fetch a single block header by number.
    fn block_by_number(&self, number: u64) -> impl Future<Output = ChainResult<BlockHeader>> + Send;

    /// Start delivering new block headers, oldest first.
    fn subscribe_blocks(&self) -> impl Future<Output = ChainResult<BlockSubscription>> + Send;
}

/// An active new-head subscription.
///
/// Headers arrive in chain order, at least once each. Dropping the
/// subscription stops the underlying poller.
pub struct BlockSubscription {
    rx: mpsc::Receiver<BlockHeader>,
    task: JoinHandle<()>,
}

impl BlockSubscription {
    /// Wrap an already-running header source. Used by alternative chain
    /// clients and test fixtures.
    pub fn new(rx: mpsc::Receiver<BlockHeader>, task: JoinHandle<()>) -> Self {
        Self { rx, task }
    }

    /// Next header, in chain order. `None` once the source is exhausted.
    pub async fn next(&mut self) -> Option<BlockHeader> {
        self.rx.recv().await
    }

    /// Cancel the subscription. No further headers are delivered.
    pub fn unsubscribe(&mut self) {
        self.task.abort();
        self.rx.close();
    }
}

impl Drop for BlockSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Chain client backed by an alloy HTTP provider.
#[derive(Clone)]
pub struct RpcChainClient {
    provider: Arc<dyn Provider + Send + Sync>,
    network_id: String,
    timeout_duration: Duration,
    poll_interval: Duration,
}

impl RpcChainClient {
    /// Connect to the configured endpoint and verify it is reachable.
    ///
    /// The chain id reported by the node becomes the relay's network id.
    /// Failure here is fatal at startup: the relay has nothing useful to
    /// do without a chain connection.
    pub async fn connect(config: &ChainConfig) -> ChainResult<Self> {
        let endpoint = config.endpoint().ok_or_else(|| {
            ChainError::Connection("no RPC endpoint configured for the test network".to_string())
        })?;
        let url: url::Url = endpoint
            .parse()
            .map_err(|e| ChainError::Connection(format!("invalid RPC URL '{}': {}", endpoint, e)))?;

        let provider =
            Arc::new(ProviderBuilder::new().connect_http(url)) as Arc<dyn Provider + Send + Sync>;
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);

        let chain_id = match timeout(timeout_duration, provider.get_chain_id()).await {
            Ok(Ok(id)) => id,
            Ok(Err(e)) => {
                return Err(ChainError::Connection(format!("chain id query failed: {}", e)))
            }
            Err(_) => {
                return Err(ChainError::Connection(format!(
                    "chain id query timed out after {}s",
                    config.rpc_timeout_secs
                )))
            }
        };

        tracing::info!(
            endpoint = %endpoint,
            chain_id,
            "Chain client connected"
        );

        Ok(Self {
            provider,
            network_id: chain_id.to_string(),
            timeout_duration,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        })
    }

    /// Current chain head number.
    pub async fn head_number(&self) -> ChainResult<u64> {
        match timeout(self.timeout_duration, self.provider.get_block_number()).await {
            Ok(Ok(number)) => Ok(number),
            Ok(Err(e)) => Err(ChainError::Rpc(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Poll the chain head and forward every new header, oldest first.
    ///
    /// A failed head poll or block fetch is logged and retried on the next
    /// tick; the subscription itself stays alive until the receiver goes
    /// away.
    async fn poll_headers(self, mut last_seen: u64, tx: mpsc::Sender<BlockHeader>) {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let head = match self.head_number().await {
                Ok(head) => head,
                Err(e) => {
                    tracing::warn!(error = %e, "Head poll failed");
                    continue;
                }
            };

            while last_seen < head {
                let next = last_seen + 1;
                match self.block_by_number(next).await {
                    Ok(header) => {
                        if tx.send(header).await.is_err() {
                            // Receiver gone: unsubscribed.
                            return;
                        }
                        last_seen = next;
                    }
                    Err(e) => {
                        tracing::warn!(block = next, error = %e, "Block fetch failed");
                        break;
                    }
                }
            }
        }
    }
}

impl ChainClient for RpcChainClient {
    fn network_id(&self) -> &str {
        &self.network_id
    }

    async fn block_by_number(&self, number: u64) -> ChainResult<BlockHeader> {
        let fut = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number));
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(Some(block))) => Ok(BlockHeader {
                number: block.header.number,
                timestamp: block.header.timestamp,
                hash: block.header.hash,
            }),
            Ok(Ok(None)) => Err(ChainError::NotFound(number)),
            Ok(Err(e)) => Err(ChainError::Rpc(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    async fn subscribe_blocks(&self) -> ChainResult<BlockSubscription> {
        // Blocks already mined when the subscription starts are not
        // replayed; the relay begins at the current head.
        let head = self.head_number().await?;

        let (tx, rx) = mpsc::channel(HEADER_CHANNEL_CAPACITY);
        let client = self.clone();
        let task = tokio::spawn(client.poll_headers(head, tx));

        tracing::debug!(from_block = head, "Block subscription started");
        Ok(BlockSubscription::new(rx, task))
    }
}

impl std::fmt::Debug for RpcChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcChainClient")
            .field("network_id", &self.network_id)
            .field("timeout", &self.timeout_duration)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}
