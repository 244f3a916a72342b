//! Shared fixtures for integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::B256;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use a0_relay::chain::{BlockHeader, BlockSubscription, ChainClient, ChainError, ChainResult};
use a0_relay::ledger::{DeliveryReceipt, LedgerError, LedgerResult, LedgerSink, MessageEnvelope};

/// Well-known test private key (Anvil's first account).
pub const TEST_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub fn header(number: u64, timestamp: u64, byte: u8) -> BlockHeader {
    BlockHeader {
        number,
        timestamp,
        hash: B256::repeat_byte(byte),
    }
}

/// Chain client that replays a scripted list of headers.
#[derive(Clone)]
pub struct ScriptedChain {
    network: String,
    /// What the subscription delivers, in order.
    stream: Arc<Vec<BlockHeader>>,
    /// What `block_by_number` returns on refetch.
    store: Arc<Vec<BlockHeader>>,
    hold_open: bool,
}

impl ScriptedChain {
    pub fn new(network: &str, headers: Vec<BlockHeader>) -> Self {
        let headers = Arc::new(headers);
        Self {
            network: network.to_string(),
            stream: headers.clone(),
            store: headers,
            hold_open: false,
        }
    }

    /// Keep the subscription open after the replay, so the oracle sits
    /// waiting like it would on a live chain.
    pub fn holding_open(network: &str, headers: Vec<BlockHeader>) -> Self {
        Self {
            hold_open: true,
            ..Self::new(network, headers)
        }
    }

    /// Answer refetches from a different header set than the stream.
    pub fn with_store(mut self, store: Vec<BlockHeader>) -> Self {
        self.store = Arc::new(store);
        self
    }
}

impl ChainClient for ScriptedChain {
    fn network_id(&self) -> &str {
        &self.network
    }

    async fn block_by_number(&self, number: u64) -> ChainResult<BlockHeader> {
        self.store
            .iter()
            .find(|h| h.number == number)
            .copied()
            .ok_or(ChainError::NotFound(number))
    }

    async fn subscribe_blocks(&self) -> ChainResult<BlockSubscription> {
        let (tx, rx) = mpsc::channel(64);
        let stream = self.stream.clone();
        let hold_open = self.hold_open;
        let task = tokio::spawn(async move {
            for header in stream.iter() {
                if tx.send(*header).await.is_err() {
                    return;
                }
            }
            if hold_open {
                // Keep the sender alive so the channel never closes.
                std::future::pending::<()>().await;
            }
        });
        Ok(BlockSubscription::new(rx, task))
    }
}

/// Chain client whose subscription cannot be established.
pub struct UnreachableChain;

impl ChainClient for UnreachableChain {
    fn network_id(&self) -> &str {
        "0"
    }

    async fn block_by_number(&self, _number: u64) -> ChainResult<BlockHeader> {
        Err(ChainError::Connection("node unreachable".to_string()))
    }

    async fn subscribe_blocks(&self) -> ChainResult<BlockSubscription> {
        Err(ChainError::Connection("node unreachable".to_string()))
    }
}

/// Scripted outcome for one delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Deliver,
    Retryable,
    Rejected,
    SigningFailure,
}

/// Ledger sink that records every attempt and replays scripted outcomes.
///
/// Once the script runs out, the default outcome applies.
#[derive(Clone)]
pub struct RecordingSink {
    attempts: Arc<Mutex<Vec<MessageEnvelope>>>,
    delivered: Arc<Mutex<Vec<MessageEnvelope>>>,
    script: Arc<Mutex<VecDeque<Outcome>>>,
    default_outcome: Outcome,
    delivery_delay: Duration,
}

impl RecordingSink {
    /// A sink that accepts everything immediately.
    pub fn new() -> Self {
        Self {
            attempts: Arc::new(Mutex::new(Vec::new())),
            delivered: Arc::new(Mutex::new(Vec::new())),
            script: Arc::new(Mutex::new(VecDeque::new())),
            default_outcome: Outcome::Deliver,
            delivery_delay: Duration::ZERO,
        }
    }

    /// A sink whose every unscripted attempt fails with `default_outcome`.
    pub fn failing_with(default_outcome: Outcome) -> Self {
        Self {
            default_outcome,
            ..Self::new()
        }
    }

    pub fn with_script(self, outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        self.script.lock().unwrap().extend(outcomes);
        self
    }

    /// Make each delivery attempt take this long.
    pub fn with_delivery_delay(mut self, delay: Duration) -> Self {
        self.delivery_delay = delay;
        self
    }

    pub fn attempts(&self) -> Vec<MessageEnvelope> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }

    pub fn delivered(&self) -> Vec<MessageEnvelope> {
        self.delivered.lock().unwrap().clone()
    }
}

impl LedgerSink for RecordingSink {
    async fn deliver(&self, envelope: MessageEnvelope) -> LedgerResult<DeliveryReceipt> {
        let outcome = {
            let mut script = self.script.lock().unwrap();
            script.pop_front().unwrap_or(self.default_outcome)
        };
        self.attempts.lock().unwrap().push(envelope.clone());

        if !self.delivery_delay.is_zero() {
            tokio::time::sleep(self.delivery_delay).await;
        }

        match outcome {
            Outcome::Deliver => {
                let message_id = {
                    let mut delivered = self.delivered.lock().unwrap();
                    delivered.push(envelope);
                    format!("msg-{}", delivered.len())
                };
                Ok(DeliveryReceipt { message_id })
            }
            Outcome::Retryable => Err(LedgerError::Retryable("injected network fault".to_string())),
            Outcome::Rejected => Err(LedgerError::Rejected("injected schema rejection".to_string())),
            Outcome::SigningFailure => {
                Err(LedgerError::Signing("injected signing failure".to_string()))
            }
        }
    }
}

/// Start a mock HTTP server that answers every request with the given
/// status line and body, recording raw request bodies.
pub async fn start_recording_server(
    response_status: &'static str,
    response_body: String,
    requests: Arc<Mutex<Vec<String>>>,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let requests = requests.clone();
                    let body = response_body.clone();
                    tokio::spawn(async move {
                        let request_body = read_request_body(&mut socket).await;
                        requests.lock().unwrap().push(request_body);

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            response_status,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Read one HTTP request off the socket and return its body.
async fn read_request_body(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        match socket.read(&mut chunk).await {
            Ok(0) => return String::new(),
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    let headers = String::from_utf8_lossy(&buf[..pos]).to_string();
                    let content_length = headers
                        .lines()
                        .filter_map(|line| line.split_once(':'))
                        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                        .unwrap_or(0);

                    let body_start = pos + 4;
                    while buf.len() < body_start + content_length {
                        match socket.read(&mut chunk).await {
                            Ok(0) => break,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                            Err(_) => break,
                        }
                    }
                    let body_end = (body_start + content_length).min(buf.len());
                    return String::from_utf8_lossy(&buf[body_start..body_end]).to_string();
                }
            }
            Err(_) => return String::new(),
        }
    }
}
