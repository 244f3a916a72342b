//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_blocks_relayed_total` (counter): descriptors delivered, by network
//! - `relay_blocks_skipped_total` (counter): blocks dropped on terminal errors, by reason
//! - `relay_delivery_retries_total` (counter): retryable delivery failures
//! - `relay_proof_submissions_total` (counter): proof submissions, by outcome
//!
//! # Design Decisions
//! - Counters only; updates on the relay path are cheap atomic increments
//! - The Prometheus exporter is optional and bound to a local address

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter. Call once at startup when enabled.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics exporter"),
    }
}

/// Record a successfully relayed block.
pub fn record_block_relayed(network: &str) {
    metrics::counter!("relay_blocks_relayed_total", "network" => network.to_string()).increment(1);
}

/// Record a block dropped on a terminal error.
pub fn record_block_skipped(reason: &'static str) {
    metrics::counter!("relay_blocks_skipped_total", "reason" => reason).increment(1);
}

/// Record one retryable delivery failure.
pub fn record_delivery_retry() {
    metrics::counter!("relay_delivery_retries_total").increment(1);
}

/// Record a proof submission attempt.
pub fn record_proof_submission(outcome: &'static str) {
    metrics::counter!("relay_proof_submissions_total", "outcome" => outcome).increment(1);
}
