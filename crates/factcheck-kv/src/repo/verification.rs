//! `verify:{jobId}:{claimId}` repository.

use factcheck_core::Verification;

use crate::client::KvClient;
use crate::error::KvResult;

fn key(job_id: &str, claim_id: &str) -> String {
    format!("verify:{job_id}:{claim_id}")
}

/// Last-write-wins store of verification results, keyed per claim.
#[derive(Clone)]
pub struct VerificationRepository {
    kv: KvClient,
}

impl VerificationRepository {
    pub fn new(kv: KvClient) -> Self {
        Self { kv }
    }

    pub async fn set(&self, job_id: &str, verification: &Verification) -> KvResult<()> {
        let encoded = serde_json::to_vec(verification)?;
        self.kv.set_bytes(&key(job_id, &verification.claim_id), encoded).await
    }

    #[tracing::instrument(skip(self), target = "factcheck_kv::repo")]
    pub async fn get(&self, job_id: &str, claim_id: &str) -> KvResult<Option<Verification>> {
        let Some(raw) = self.kv.get_bytes(&key(job_id, claim_id)).await? else {
            return Ok(None);
        };
        match serde_json::from_slice(&raw) {
            Ok(verification) => Ok(Some(verification)),
            Err(error) => {
                tracing::warn!(
                    target: crate::TRACING_TARGET_REPO,
                    job_id,
                    claim_id,
                    %error,
                    "discarding corrupt verification record"
                );
                Ok(None)
            }
        }
    }
}
