//! Shared application state, threaded through every handler via
//! `axum::extract::State`.

use factcheck_kv::{BlobRepository, ClaimBufferRepository, JobRepository, KvClient, VerificationRepository};
use factcheck_llm::{AnthropicClient, EmbeddingClient, LlmConfig, VerificationPipeline};

/// Everything a handler needs: the four repositories plus the LLM clients,
/// all cheaply `Clone`-able handles over pooled connections.
#[derive(Clone)]
pub struct ServiceState {
    pub jobs: JobRepository,
    pub claims: ClaimBufferRepository,
    pub verifications: VerificationRepository,
    pub blobs: BlobRepository,
    pub anthropic: AnthropicClient,
    pub verification_pipeline: VerificationPipeline,
    pub max_file_mb: u64,
}

impl ServiceState {
    pub fn new(kv: KvClient, llm_config: LlmConfig, max_file_mb: u64) -> factcheck_core::Result<Self> {
        let anthropic = AnthropicClient::new(llm_config.clone())?;
        let embedding = EmbeddingClient::new(&llm_config)?;
        let verification_pipeline = VerificationPipeline::new(embedding, anthropic.clone());

        Ok(Self {
            jobs: JobRepository::new(kv.clone()),
            claims: ClaimBufferRepository::new(kv.clone()),
            verifications: VerificationRepository::new(kv.clone()),
            blobs: BlobRepository::new(kv),
            anthropic,
            verification_pipeline,
            max_file_mb,
        })
    }
}
