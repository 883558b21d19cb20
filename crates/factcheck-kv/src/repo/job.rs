//! `jobs:{id}` hash repository.

use factcheck_core::event::{ProgressEvent, ProgressPhase};
use factcheck_core::job::{Job, JobStatus};

use crate::client::KvClient;
use crate::error::KvResult;

fn key(job_id: &str) -> String {
    format!("jobs:{job_id}")
}

fn now() -> i64 {
    jiff::Timestamp::now().as_second()
}

/// Repository over the `jobs:{id}` Redis hash.
///
/// The hash carries both a top-level `processed`/`total` mirror and
/// phase-qualified `progress_processed`/`progress_total`/`progress_ts`
/// fields; `save_phase_progress` keeps the two in lockstep so either can be
/// read back without knowing which call populated it.
#[derive(Clone)]
pub struct JobRepository {
    kv: KvClient,
}

impl JobRepository {
    pub fn new(kv: KvClient) -> Self {
        Self { kv }
    }

    #[tracing::instrument(skip(self), target = "factcheck_kv::repo")]
    pub async fn create(&self, job: &Job) -> KvResult<()> {
        self.put(job).await
    }

    pub async fn put(&self, job: &Job) -> KvResult<()> {
        let fields = [
            ("id", job.id.clone()),
            ("status", status_to_field(job.status).to_string()),
            ("phase", phase_to_field(job.phase).to_string()),
            ("processed", job.processed.to_string()),
            ("total", job.total.to_string()),
            ("progress_processed", job.processed.to_string()),
            ("progress_total", job.total.to_string()),
            ("progress_ts", job.ts.to_string()),
        ];
        self.kv.hset_many(&key(&job.id), &fields).await
    }

    /// Returns `None` if the job is missing, expired, or its stored fields
    /// fail to decode - corrupt state is absorbed here, never propagated.
    #[tracing::instrument(skip(self), target = "factcheck_kv::repo")]
    pub async fn get(&self, job_id: &str) -> KvResult<Option<Job>> {
        let raw = self.kv.hgetall(&key(job_id)).await?;
        if raw.is_empty() {
            return Ok(None);
        }

        let Some(status) = raw.get("status").and_then(|s| field_to_status(s)) else {
            tracing::warn!(target: crate::TRACING_TARGET_REPO, job_id, "missing or unknown job status field");
            return Ok(None);
        };
        let Some(phase) = raw.get("phase").and_then(|s| field_to_phase(s)) else {
            tracing::warn!(target: crate::TRACING_TARGET_REPO, job_id, "missing or unknown job phase field");
            return Ok(None);
        };
        let Some(ts) = raw.get("progress_ts").and_then(|s| s.parse::<i64>().ok()) else {
            tracing::warn!(target: crate::TRACING_TARGET_REPO, job_id, "unparsable job progress_ts field");
            return Ok(None);
        };

        let processed = raw.get("processed").and_then(|s| s.parse::<u32>().ok()).unwrap_or(0);
        let total = raw.get("total").and_then(|s| s.parse::<u32>().ok()).unwrap_or(0);

        Ok(Some(Job {
            id: job_id.to_string(),
            status,
            phase,
            processed,
            total,
            ts,
        }))
    }

    pub async fn touch(&self, job_id: &str) -> KvResult<()> {
        self.kv.expire(&key(job_id)).await
    }

    pub async fn delete(&self, job_id: &str) -> KvResult<()> {
        self.kv.del(&key(job_id)).await
    }

    pub async fn set_status(&self, job_id: &str, status: JobStatus) -> KvResult<()> {
        self.kv
            .hset_many(&key(job_id), &[("status", status_to_field(status).to_string())])
            .await
    }

    /// Persist a phase/progress snapshot, refreshing both the top-level
    /// `processed`/`total` mirror and the phase-qualified snapshot fields
    /// (including a fresh `progress_ts`). Returns the timestamp written, so
    /// callers can stamp the matching wire event without a second read.
    pub async fn save_phase_progress(
        &self,
        job_id: &str,
        phase: ProgressPhase,
        processed: u32,
        total: u32,
    ) -> KvResult<i64> {
        let ts = now();
        self.kv
            .hset_many(
                &key(job_id),
                &[
                    ("phase", phase_to_field(phase).to_string()),
                    ("processed", processed.to_string()),
                    ("total", total.to_string()),
                    ("progress_processed", processed.to_string()),
                    ("progress_total", total.to_string()),
                    ("progress_ts", ts.to_string()),
                ],
            )
            .await?;
        Ok(ts)
    }

    /// Reconstruct the most advanced progress event known for this job, so
    /// a reconnecting client is re-synced without replaying history.
    /// Returns `None` unless the job exists and `total > 0`.
    pub async fn get_progress_snapshot(&self, job_id: &str) -> KvResult<Option<ProgressEvent>> {
        let Some(job) = self.get(job_id).await? else {
            return Ok(None);
        };
        if job.total == 0 {
            return Ok(None);
        }

        Ok(Some(ProgressEvent {
            phase: job.phase,
            processed: job.processed,
            total: job.total,
            ts: job.ts,
        }))
    }
}

fn status_to_field(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Streaming => "streaming",
        JobStatus::Finished => "finished",
    }
}

fn field_to_status(field: &str) -> Option<JobStatus> {
    match field {
        "streaming" => Some(JobStatus::Streaming),
        "finished" => Some(JobStatus::Finished),
        _ => None,
    }
}

fn phase_to_field(phase: ProgressPhase) -> &'static str {
    match phase {
        ProgressPhase::Parse => "parse",
        ProgressPhase::Extract => "extract",
    }
}

fn field_to_phase(field: &str) -> Option<ProgressPhase> {
    match field {
        "parse" => Some(ProgressPhase::Parse),
        "extract" => Some(ProgressPhase::Extract),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_field_round_trips() {
        for status in [JobStatus::Streaming, JobStatus::Finished] {
            let field = status_to_field(status);
            assert_eq!(field_to_status(field), Some(status));
        }
    }

    #[test]
    fn phase_field_round_trips() {
        for phase in [ProgressPhase::Parse, ProgressPhase::Extract] {
            let field = phase_to_field(phase);
            assert_eq!(field_to_phase(field), Some(phase));
        }
    }

    #[test]
    fn unknown_status_field_decodes_to_none() {
        assert_eq!(field_to_status("bogus"), None);
    }
}
