//! The `Job` aggregate: one PDF upload and its processing lifecycle.

use serde::{Deserialize, Serialize};

use crate::event::ProgressPhase;

/// Lifecycle state of a job. A job is `Streaming` from creation until
/// extraction completes, at which point it becomes `Finished` and never
/// re-enters extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Streaming,
    Finished,
}

impl Default for JobStatus {
    fn default() -> Self {
        Self::Streaming
    }
}

/// A single upload's processing state, mirrored onto the `jobs:{id}`
/// Redis hash (see `factcheck_kv::repo::JobRepository`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    pub phase: ProgressPhase,
    /// Pages accounted for so far in the current phase.
    pub processed: u32,
    /// Total page count, known once the PDF has been opened; `0` until
    /// then.
    pub total: u32,
    /// Unix seconds of the last progress snapshot update.
    pub ts: i64,
}

impl Job {
    pub fn new(id: impl Into<String>, ts: i64) -> Self {
        Self {
            id: id.into(),
            status: JobStatus::Streaming,
            phase: ProgressPhase::Parse,
            processed: 0,
            total: 0,
            ts,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status == JobStatus::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_job_starts_streaming_in_parse_phase() {
        let job = Job::new("job-1", 1_700_000_000);
        assert_eq!(job.status, JobStatus::Streaming);
        assert_eq!(job.phase, ProgressPhase::Parse);
        assert!(!job.is_terminal());
        assert_eq!(job.processed, 0);
    }

    #[test]
    fn status_round_trips_through_serde() {
        let job = Job {
            status: JobStatus::Finished,
            phase: ProgressPhase::Extract,
            ..Job::new("job-2", 0)
        };
        let encoded = serde_json::to_string(&job).unwrap();
        assert!(encoded.contains("\"finished\""));
        assert!(encoded.contains("\"extract\""));
        let decoded: Job = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.status, JobStatus::Finished);
        assert_eq!(decoded.phase, ProgressPhase::Extract);
        assert!(decoded.is_terminal());
    }
}
