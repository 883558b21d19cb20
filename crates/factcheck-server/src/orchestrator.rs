//! The Stream Orchestrator: the state machine behind `/stream-claim`.
//!
//! Steps, mirroring the five stages a reconnecting client needs to pass
//! through to end up caught up with a job:
//!
//! - **S0** resolve the job. If it does not exist (or has expired), emit an
//!   `error` event followed by `done` and stop - the HTTP layer always
//!   upgrades to a 200 NDJSON stream regardless of whether the job is
//!   known, so this is the only place an unknown `jobId` is surfaced.
//! - **S1** emit the persisted progress snapshot, if any - at most one,
//!   even on reconnect.
//! - **S2** replay the claim buffer in insertion order, touching its TTL
//!   and merging in any verification already recorded, and build a
//!   skip-set of claim ids already emitted.
//! - **S3** if the job is already finished, emit `done` and stop; nothing
//!   else runs.
//! - **S4/S5** otherwise resume: (re)run the parse-phase progress ladder
//!   unless the snapshot shows extraction already under way, then drive
//!   the extraction worker pool. Every claim is appended to the buffer
//!   *before* it is emitted (the buffer-before-emit invariant), and claim
//!   ids already in the skip-set are appended but not re-emitted, since
//!   extraction ids are deterministic per page+index and will match
//!   across runs.
//! - **Done.** Mark the job finished and emit the terminal `done` event.

use std::collections::HashSet;

use bytes::Bytes;
use factcheck_core::event::{DoneEvent, ErrorPayload, ProgressEvent, ProgressPhase, StreamEvent};
use factcheck_core::job::JobStatus;
use factcheck_llm::PageClaims;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::state::ServiceState;

const TARGET: &str = "factcheck_server::orchestrator";

/// Run the orchestrator for `job_id`, writing NDJSON lines to `tx` until
/// the job reaches a terminal state or `cancel` fires (the client
/// disconnected). Errors encountered mid-stream are logged and end the
/// stream; a client that reconnects will resume from wherever the buffer
/// and job record got to.
pub async fn run(state: ServiceState, job_id: String, api_key: String, tx: mpsc::Sender<Bytes>, cancel: CancellationToken) {
    if let Err(error) = run_inner(&state, &job_id, &api_key, &tx, &cancel).await {
        tracing::error!(target: TARGET, job_id, %error, "stream orchestrator aborted");
    }
}

async fn run_inner(
    state: &ServiceState,
    job_id: &str,
    api_key: &str,
    tx: &mpsc::Sender<Bytes>,
    cancel: &CancellationToken,
) -> factcheck_core::Result<()> {
    // S0: an unknown or expired jobId is reported inside the stream, not
    // as an HTTP error - the response has already been upgraded to a 200
    // NDJSON body by the time this runs.
    let Some(job) = state.jobs.get(job_id).await? else {
        tracing::warn!(target: TARGET, job_id, "stream requested for unknown job");
        emit(
            tx,
            StreamEvent::Error(ErrorPayload {
                message: "Unknown or expired jobId".to_string(),
            }),
        )
        .await;
        emit(tx, StreamEvent::Done(DoneEvent::default())).await;
        return Ok(());
    };

    // S1: emit the latest snapshot, if any, before anything is replayed.
    let snapshot = state.jobs.get_progress_snapshot(job_id).await?;
    if let Some(snapshot) = &snapshot {
        if !emit(tx, StreamEvent::Progress(snapshot.clone())).await {
            return Ok(());
        }
    }

    // S2: replay the buffer, merging verifications, and collect a skip-set
    // of claim ids already emitted to this (or a previous) connection.
    let buffered = state.claims.all(job_id).await?;
    let mut skip: HashSet<String> = HashSet::with_capacity(buffered.len());
    for claim in &buffered {
        state.claims.touch(job_id).await?;
        skip.insert(claim.id.clone());
        let merged = match state.verifications.get(job_id, &claim.id).await? {
            Some(verification) => claim.merged_with(&verification),
            None => claim.clone(),
        };
        if !emit(tx, StreamEvent::Claim(merged)).await {
            return Ok(());
        }
    }

    // S3: a job already finished has nothing left to compute.
    if job.status == JobStatus::Finished {
        emit(tx, StreamEvent::Done(DoneEvent::default())).await;
        return Ok(());
    }

    let Some(bytes) = state.blobs.get_pdf(job_id).await? else {
        tracing::warn!(target: TARGET, job_id, "job has no stored pdf blob, cannot extract");
        return Ok(());
    };
    let pages = factcheck_pdf::extract_pages(&bytes);
    let total_pages = pages.len() as u32;

    let emit_parse = snapshot.as_ref().map(|s| s.phase) != Some(ProgressPhase::Extract);
    let extract_start = match &snapshot {
        Some(s) if s.phase == ProgressPhase::Extract => s.processed,
        _ => 0,
    };

    // S4: parse phase - a UI affordance re-announcing the boundary of the
    // parse already completed, skipped on a reconnect that is already past
    // it.
    if emit_parse {
        for processed in 0..=total_pages {
            if cancel.is_cancelled() {
                return Ok(());
            }
            let ts = state
                .jobs
                .save_phase_progress(job_id, ProgressPhase::Parse, processed, total_pages)
                .await?;
            let progress = ProgressEvent {
                phase: ProgressPhase::Parse,
                processed,
                total: total_pages,
                ts,
            };
            if !emit(tx, StreamEvent::Progress(progress)).await {
                return Ok(());
            }
        }
    }

    // S5: extraction phase.
    let mut receiver = factcheck_llm::spawn_extraction(state.anthropic.clone(), api_key.to_string(), pages, cancel.clone());

    let mut finished_pages = extract_start;
    while let Some(PageClaims { claims, .. }) = receiver.recv().await {
        if cancel.is_cancelled() {
            return Ok(());
        }

        for claim in claims {
            if skip.contains(&claim.id) {
                continue;
            }
            // Buffer-before-emit: a reconnecting client must never see a
            // claim on the wire that isn't already durable.
            state.claims.append(job_id, &claim).await?;
            skip.insert(claim.id.clone());
            if !emit(tx, StreamEvent::Claim(claim)).await {
                return Ok(());
            }
        }

        finished_pages += 1;
        let ts = state
            .jobs
            .save_phase_progress(job_id, ProgressPhase::Extract, finished_pages, total_pages)
            .await?;
        let progress = ProgressEvent {
            phase: ProgressPhase::Extract,
            processed: finished_pages,
            total: total_pages,
            ts,
        };
        if !emit(tx, StreamEvent::Progress(progress)).await {
            return Ok(());
        }
    }

    state.jobs.set_status(job_id, JobStatus::Finished).await?;
    emit(tx, StreamEvent::Done(DoneEvent::default())).await;
    Ok(())
}

/// Encode and send one event. Returns `false` if the receiver has been
/// dropped (the client disconnected), signaling the caller to stop.
async fn emit(tx: &mpsc::Sender<Bytes>, event: StreamEvent) -> bool {
    let line = match event.to_ndjson_line() {
        Ok(line) => line,
        Err(error) => {
            tracing::error!(target: TARGET, %error, "failed to encode stream event");
            return true;
        }
    };
    tx.send(Bytes::from(line)).await.is_ok()
}
