//! `POST /api/v1/upload-paper`

use axum::extract::{Multipart, State};
use axum::Json;
use factcheck_core::ErrorKind;
use serde::Serialize;
use uuid::Uuid;

use crate::handler::error::{ApiError, ApiResult};
use crate::service;
use crate::state::ServiceState;

#[derive(Serialize)]
pub struct UploadPaperResponse {
    #[serde(rename = "jobId")]
    pub job_id: String,
}

#[tracing::instrument(skip_all, target = "factcheck_server::handler")]
pub async fn upload_paper(
    State(state): State<ServiceState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadPaperResponse>> {
    let max_bytes = (state.max_file_mb as usize) * 1024 * 1024;
    let mut pdf_bytes: Option<Vec<u8>> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::new(ErrorKind::InvalidInput).with_message("malformed multipart body"))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if content_type != "application/pdf" {
            return Err(ApiError::new(ErrorKind::InvalidInput).with_message("expected a application/pdf file field"));
        }

        let mut buffer = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|_| ApiError::new(ErrorKind::InvalidInput).with_message("failed reading upload body"))?
        {
            if buffer.len() + chunk.len() > max_bytes {
                return Err(ApiError::new(ErrorKind::InvalidInput).with_message("file exceeds the configured size limit"));
            }
            buffer.extend_from_slice(&chunk);
        }
        pdf_bytes = Some(buffer);
    }

    let Some(bytes) = pdf_bytes else {
        return Err(ApiError::new(ErrorKind::InvalidInput).with_message("missing `file` field"));
    };
    if bytes.is_empty() {
        return Err(ApiError::new(ErrorKind::InvalidInput).with_message("uploaded file is empty"));
    }

    let job_id = Uuid::now_v7().to_string();
    let ts = jiff::Timestamp::now().as_second();
    let job = service::create_job_for_file(&state, job_id, ts, bytes)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UploadPaperResponse { job_id: job.id }))
}
