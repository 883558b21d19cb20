//! `claims:{jobId}` list repository - the claim buffer.

use factcheck_core::Claim;

use crate::client::KvClient;
use crate::error::KvResult;

fn key(job_id: &str) -> String {
    format!("claims:{job_id}")
}

/// Append-only buffer of claims emitted so far for a job, used to replay
/// history to a reconnecting client without re-running extraction.
#[derive(Clone)]
pub struct ClaimBufferRepository {
    kv: KvClient,
}

impl ClaimBufferRepository {
    pub fn new(kv: KvClient) -> Self {
        Self { kv }
    }

    pub async fn append(&self, job_id: &str, claim: &Claim) -> KvResult<()> {
        let encoded = serde_json::to_string(claim)?;
        self.kv.rpush(&key(job_id), encoded).await
    }

    /// All claims buffered so far, in emission order. Entries that fail to
    /// decode are logged and skipped rather than failing the whole replay.
    #[tracing::instrument(skip(self), target = "factcheck_kv::repo")]
    pub async fn all(&self, job_id: &str) -> KvResult<Vec<Claim>> {
        let raw = self.kv.lrange_all(&key(job_id)).await?;
        let mut claims = Vec::with_capacity(raw.len());
        for (index, entry) in raw.into_iter().enumerate() {
            match serde_json::from_str::<Claim>(&entry) {
                Ok(claim) => claims.push(claim),
                Err(error) => {
                    tracing::warn!(
                        target: crate::TRACING_TARGET_REPO,
                        job_id,
                        index,
                        %error,
                        "skipping malformed buffered claim"
                    );
                }
            }
        }
        Ok(claims)
    }

    pub async fn clear(&self, job_id: &str) -> KvResult<()> {
        self.kv.del(&key(job_id)).await
    }

    pub async fn touch(&self, job_id: &str) -> KvResult<()> {
        self.kv.expire(&key(job_id)).await
    }
}
