//! `POST /api/v1/validate-api-key`

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::handler::error::{ApiError, ApiResult};
use crate::state::ServiceState;

#[derive(Deserialize)]
pub struct ValidateKeyRequest {
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

#[derive(Serialize)]
pub struct ValidateKeyResponse {
    pub valid: bool,
}

#[tracing::instrument(skip_all, target = "factcheck_server::handler")]
pub async fn validate_api_key(
    State(state): State<ServiceState>,
    Json(request): Json<ValidateKeyRequest>,
) -> ApiResult<Json<ValidateKeyResponse>> {
    let valid = state.anthropic.validate_api_key(&request.api_key).await.map_err(|error| {
        let core_error: factcheck_core::Error = error.into();
        ApiError::from(core_error)
    })?;

    Ok(Json(ValidateKeyResponse { valid }))
}
