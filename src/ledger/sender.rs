//! Message delivery to the destination ledger.
//!
//! # Responsibilities
//! - Sign each envelope and POST it to the ingestion endpoint
//! - Classify failures as retryable or terminal
//!
//! No deduplication happens here: every call is one distinct delivery
//! attempt. The relay loop owns the retry decision, and the block hash
//! inside the payload lets the receiver spot duplicates.

use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use url::Url;

use crate::config::schema::LedgerConfig;
use crate::ledger::envelope::MessageEnvelope;
use crate::ledger::signer::LedgerSigner;
use crate::ledger::types::{DeliveryReceipt, LedgerError, LedgerResult};

/// Destination for envelopes.
///
/// The relay loop and the proof pipeline are generic over this so tests
/// can record deliveries without a network.
pub trait LedgerSink {
    fn deliver(
        &self,
        envelope: MessageEnvelope,
    ) -> impl Future<Output = LedgerResult<DeliveryReceipt>> + Send;
}

/// HTTP sender for the ledger's message-ingestion endpoint.
#[derive(Debug, Clone)]
pub struct LedgerSender {
    http: reqwest::Client,
    signer: LedgerSigner,
    ingestion_url: Url,
}

impl LedgerSender {
    pub fn new(config: &LedgerConfig, signer: LedgerSigner) -> LedgerResult<Self> {
        let ingestion_url: Url = config.ingestion_url.parse().map_err(|e| {
            LedgerError::Rejected(format!(
                "invalid ingestion URL '{}': {}",
                config.ingestion_url, e
            ))
        })?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| LedgerError::Rejected(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            http,
            signer,
            ingestion_url,
        })
    }
}

impl LedgerSink for LedgerSender {
    async fn deliver(&self, envelope: MessageEnvelope) -> LedgerResult<DeliveryReceipt> {
        let message = self.signer.sign(&envelope).await?;

        let response = self
            .http
            .post(self.ingestion_url.clone())
            .json(&message)
            .send()
            .await
            .map_err(|e| {
                LedgerError::Retryable(format!("ingestion endpoint unreachable: {}", e))
            })?;

        let status = response.status();
        if status.is_success() {
            let message_id = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body.get("id").and_then(|id| id.as_str()).map(str::to_string))
                .unwrap_or_default();
            return Ok(DeliveryReceipt { message_id });
        }

        let body = response.text().await.unwrap_or_default();
        if is_retryable_status(status) {
            Err(LedgerError::Retryable(format!(
                "ingestion endpoint returned {}: {}",
                status, body
            )))
        } else {
            Err(LedgerError::Rejected(format!(
                "ingestion endpoint returned {}: {}",
                status, body
            )))
        }
    }
}

/// Statuses worth retrying: timeouts, throttling, server-side faults.
/// Everything else in the error range means the message itself was
/// rejected.
fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(StatusCode::REQUEST_TIMEOUT));
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_retryable_status(StatusCode::BAD_GATEWAY));
        assert!(is_retryable_status(StatusCode::SERVICE_UNAVAILABLE));
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!is_retryable_status(StatusCode::BAD_REQUEST));
        assert!(!is_retryable_status(StatusCode::UNAUTHORIZED));
        assert!(!is_retryable_status(StatusCode::FORBIDDEN));
        assert!(!is_retryable_status(StatusCode::UNPROCESSABLE_ENTITY));
    }

    #[test]
    fn test_invalid_ingestion_url_rejected() {
        let config = LedgerConfig {
            ingestion_url: "not a url".to_string(),
            ..LedgerConfig::default()
        };
        let signer = LedgerSigner::from_private_key(
            "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        )
        .unwrap();
        assert!(matches!(
            LedgerSender::new(&config, signer),
            Err(LedgerError::Rejected(_))
        ));
    }
}
