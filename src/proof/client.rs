//! Proof-generation service client.
//!
//! The proof service is an opaque collaborator: one GET per wallet
//! address, returning either an `Ok` wrapper around a receipt or an
//! `Err` wrapper with a message.

use serde_json::Value;
use url::Url;

use crate::config::schema::ProofConfig;
use crate::proof::submission::ProofPayload;
use crate::proof::types::{ProofError, ProofResult};

/// HTTP client for the external proof-generation endpoint.
#[derive(Debug, Clone)]
pub struct ProofClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProofClient {
    pub fn new(config: &ProofConfig) -> ProofResult<Self> {
        // Parsed once to reject bad configuration early.
        config.base_url.parse::<Url>().map_err(|e| {
            ProofError::Service(format!("invalid proof service URL '{}': {}", config.base_url, e))
        })?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Request a receipt for a wallet address.
    pub async fn generate(&self, address: &str) -> ProofResult<ProofPayload> {
        let url = format!("{}/generate/{}", self.base_url, address);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProofError::Service(format!(
                "proof service returned {}: {}",
                status, body
            )));
        }

        let body: Value = response.json().await?;
        match body {
            Value::String(raw) => Ok(ProofPayload::RawString(raw)),
            Value::Object(ref fields) if fields.contains_key("Ok") => {
                let receipt = body["Ok"]
                    .get("receipt")
                    .cloned()
                    .ok_or_else(|| ProofError::InvalidProof("proof response missing receipt".to_string()))?;
                Ok(ProofPayload::Structured { receipt })
            }
            Value::Object(ref fields) if fields.contains_key("Err") => {
                let message = body["Err"]
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown proof service failure");
                Err(ProofError::Service(message.to_string()))
            }
            other => Err(ProofError::InvalidProof(format!(
                "unrecognized proof response shape: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ProofConfig {
            base_url: "not a url".to_string(),
        };
        assert!(matches!(ProofClient::new(&config), Err(ProofError::Service(_))));
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let config = ProofConfig {
            base_url: "http://localhost:3000/".to_string(),
        };
        let client = ProofClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
