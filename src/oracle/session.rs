//! Relay session state.

use crate::chain::client::{BlockSubscription, ChainClient};
use crate::chain::types::{BlockHeader, ChainResult};

/// Process-wide relay state: the chain client and the active subscription.
///
/// Constructed by the entry point and handed to the oracle — never ambient
/// global state — so tests can run several sessions side by side without
/// interference. Exactly one session is active per production process.
pub struct RelaySession<C> {
    client: C,
    subscription: Option<BlockSubscription>,
    running: bool,
}

impl<C: ChainClient> RelaySession<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            subscription: None,
            running: false,
        }
    }

    /// Register the new-block subscription.
    pub async fn open(&mut self) -> ChainResult<()> {
        let subscription = self.client.subscribe_blocks().await?;
        self.subscription = Some(subscription);
        self.running = true;
        Ok(())
    }

    /// Next header from the subscription. `None` when the source is
    /// exhausted or the session was never opened.
    pub async fn next_block(&mut self) -> Option<BlockHeader> {
        match self.subscription.as_mut() {
            Some(subscription) => subscription.next().await,
            None => None,
        }
    }

    /// Cancel the subscription and release the handle.
    pub fn close(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.running = false;
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::types::{ChainError, ChainResult};
    use alloy::primitives::B256;
    use tokio::sync::mpsc;

    struct OneShotChain;

    impl ChainClient for OneShotChain {
        fn network_id(&self) -> &str {
            "31337"
        }

        async fn block_by_number(&self, number: u64) -> ChainResult<BlockHeader> {
            Err(ChainError::NotFound(number))
        }

        async fn subscribe_blocks(&self) -> ChainResult<BlockSubscription> {
            let (tx, rx) = mpsc::channel(4);
            let task = tokio::spawn(async move {
                let _ = tx
                    .send(BlockHeader {
                        number: 1,
                        timestamp: 100,
                        hash: B256::repeat_byte(0x11),
                    })
                    .await;
            });
            Ok(BlockSubscription::new(rx, task))
        }
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let mut session = RelaySession::new(OneShotChain);
        assert!(!session.is_running());
        assert!(session.next_block().await.is_none());

        session.open().await.unwrap();
        assert!(session.is_running());
        assert_eq!(session.next_block().await.unwrap().number, 1);
        assert!(session.next_block().await.is_none());

        session.close();
        assert!(!session.is_running());
        assert!(session.next_block().await.is_none());
    }
}
