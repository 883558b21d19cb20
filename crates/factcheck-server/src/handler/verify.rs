//! `POST /api/v1/verify-claim`
//!
//! Multipart: `jobId`, `claimId`, `apiKey` as text fields and `file` as the
//! cited source PDF to verify the claim against - a separate upload from
//! the paper the claim was extracted from.

use axum::extract::{Multipart, State};
use axum::Json;
use factcheck_core::ErrorKind;
use serde::Serialize;

use crate::handler::error::{ApiError, ApiResult};
use crate::service;
use crate::state::ServiceState;

#[derive(Serialize)]
pub struct VerifyClaimResponse {
    #[serde(rename = "claimId")]
    pub claim_id: String,
    pub verdict: factcheck_core::Verdict,
    pub confidence: f32,
    #[serde(rename = "reasoningMd")]
    pub reasoning_md: String,
    pub evidence: Vec<factcheck_core::Evidence>,
}

#[tracing::instrument(skip_all, target = "factcheck_server::handler")]
pub async fn verify_claim(State(state): State<ServiceState>, mut multipart: Multipart) -> ApiResult<Json<VerifyClaimResponse>> {
    let mut job_id: Option<String> = None;
    let mut claim_id: Option<String> = None;
    let mut api_key: Option<String> = None;
    let mut source_bytes: Option<Vec<u8>> = None;
    let mut source_filename: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::new(ErrorKind::InvalidInput).with_message("malformed multipart body"))?
    {
        match field.name() {
            Some("jobId") => {
                job_id = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| ApiError::new(ErrorKind::InvalidInput).with_message("failed reading jobId field"))?,
                )
            }
            Some("claimId") => {
                claim_id = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| ApiError::new(ErrorKind::InvalidInput).with_message("failed reading claimId field"))?,
                )
            }
            Some("apiKey") => {
                api_key = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| ApiError::new(ErrorKind::InvalidInput).with_message("failed reading apiKey field"))?,
                )
            }
            Some("file") => {
                source_filename = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::new(ErrorKind::InvalidInput).with_message("failed reading upload body"))?;
                source_bytes = Some(bytes.to_vec());
            }
            _ => continue,
        }
    }

    let job_id = job_id.ok_or_else(|| ApiError::new(ErrorKind::InvalidInput).with_message("missing `jobId` field"))?;
    let claim_id = claim_id.ok_or_else(|| ApiError::new(ErrorKind::InvalidInput).with_message("missing `claimId` field"))?;
    let api_key = api_key.ok_or_else(|| ApiError::new(ErrorKind::InvalidInput).with_message("missing `apiKey` field"))?;
    let source_bytes = source_bytes.ok_or_else(|| ApiError::new(ErrorKind::InvalidInput).with_message("missing `file` field"))?;

    let verification = service::verify_claim(&state, &job_id, &claim_id, &api_key, source_filename, source_bytes)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(VerifyClaimResponse {
        claim_id: verification.claim_id,
        verdict: verification.verdict,
        confidence: verification.confidence,
        reasoning_md: verification.reasoning_md,
        evidence: verification.evidence,
    }))
}
