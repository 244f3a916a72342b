//! Receipt fetch → normalize → submit.

use crate::ledger::envelope::MessageEnvelope;
use crate::ledger::sender::LedgerSink;
use crate::ledger::types::DeliveryReceipt;
use crate::observability::metrics;
use crate::proof::client::ProofClient;
use crate::proof::submission::normalize;
use crate::proof::types::ProofResult;

/// Fetch a receipt for `address`, normalize it, and submit it to the
/// destination ledger as a `Bridge` message.
///
/// Nothing is sent when normalization fails, and a failed delivery
/// surfaces to the caller — it is never reported as submitted.
pub async fn submit_proof<S: LedgerSink>(
    proof_client: &ProofClient,
    sink: &S,
    process_id: &str,
    address: &str,
) -> ProofResult<DeliveryReceipt> {
    match submit_proof_inner(proof_client, sink, process_id, address).await {
        Ok(receipt) => {
            metrics::record_proof_submission("delivered");
            Ok(receipt)
        }
        Err(e) => {
            metrics::record_proof_submission("failed");
            Err(e)
        }
    }
}

async fn submit_proof_inner<S: LedgerSink>(
    proof_client: &ProofClient,
    sink: &S,
    process_id: &str,
    address: &str,
) -> ProofResult<DeliveryReceipt> {
    let payload = proof_client.generate(address).await?;
    let submission = normalize(payload, Some(address))?;
    let envelope = MessageEnvelope::bridge(process_id, &submission)?;

    let receipt = sink.deliver(envelope).await?;
    tracing::info!(
        withdraw = %submission.withdraw,
        message_id = %receipt.message_id,
        "Proof submitted"
    );
    Ok(receipt)
}
