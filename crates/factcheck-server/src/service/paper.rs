//! The Paper Service: the three use cases the HTTP handlers delegate to.

use bytes::Bytes;
use factcheck_core::job::Job;
use factcheck_core::verification::Verification;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

use crate::orchestrator;
use crate::state::ServiceState;

const CHANNEL_CAPACITY: usize = 32;

/// Create a job for a freshly uploaded PDF, storing its bytes under the
/// same id the client will use to `POST /stream-claim`.
pub async fn create_job_for_file(state: &ServiceState, job_id: String, ts: i64, bytes: Vec<u8>) -> factcheck_core::Result<Job> {
    let job = Job::new(job_id.clone(), ts);
    state.jobs.create(&job).await?;
    state.blobs.put_pdf(&job_id, bytes).await?;
    state.claims.clear(&job_id).await?;
    Ok(job)
}

/// A live NDJSON body stream plus the cancellation handle that stops the
/// orchestrator once the client disconnects.
pub struct ClaimStream {
    pub body: ReceiverStream<Bytes>,
    pub cancel: CancellationToken,
}

/// Start (or resume) streaming claims for a job. The returned stream ends
/// when the orchestrator reaches a terminal state or `cancel` fires.
pub fn stream_claims(state: ServiceState, job_id: String, api_key: String) -> ClaimStream {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let cancel = CancellationToken::new();

    tokio::spawn(orchestrator::run(state, job_id, api_key, tx, cancel.clone()));

    ClaimStream {
        body: ReceiverStream::new(rx),
        cancel,
    }
}

/// Verify a single claim against a separately uploaded cited source PDF,
/// storing the result so future replays (and duplicate verify calls) are
/// last-write-wins idempotent. If `claim_id` isn't a claim already
/// buffered for `job_id`, the id itself is used as the claim text - the
/// client may be verifying a claim it already knows about without having
/// reconnected to the stream first.
pub async fn verify_claim(
    state: &ServiceState,
    job_id: &str,
    claim_id: &str,
    api_key: &str,
    source_filename: Option<String>,
    source_bytes: Vec<u8>,
) -> factcheck_core::Result<Verification> {
    let pages = factcheck_pdf::extract_pages(&source_bytes);
    let paper_title = source_filename.unwrap_or_else(|| "Source PDF".to_string());

    let claims = state.claims.all(job_id).await?;
    let claim_text = claims
        .into_iter()
        .find(|c| c.id == claim_id)
        .map(|c| c.text)
        .unwrap_or_else(|| claim_id.to_string());

    let outcome = state
        .verification_pipeline
        .verify_claim(api_key, &claim_text, &paper_title, &pages)
        .await
        .map_err(factcheck_core::Error::from)?;

    let verification = Verification {
        claim_id: claim_id.to_string(),
        verdict: outcome.verdict,
        confidence: outcome.confidence,
        reasoning_md: outcome.reasoning_md,
        evidence: outcome.evidence,
    };
    state.verifications.set(job_id, &verification).await?;
    Ok(verification)
}
