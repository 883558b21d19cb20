//! Maps the shared [`factcheck_core::ErrorKind`] taxonomy onto HTTP
//! responses, the way every handler in this crate surfaces a failure.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use factcheck_core::ErrorKind;
use serde::Serialize;

/// HTTP-facing error wrapper. Built from a [`factcheck_core::Error`] or
/// directly from an [`ErrorKind`] when a handler has no underlying cause
/// to attach (e.g. a missing path parameter).
#[derive(Debug)]
pub struct ApiError {
    kind: ErrorKind,
    message: Option<String>,
}

impl ApiError {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, message: None }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn status(&self) -> StatusCode {
        match self.kind {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::AuthError => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::UpstreamError => StatusCode::BAD_GATEWAY,
            ErrorKind::CorruptState | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self.kind {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::AuthError => "auth_error",
            ErrorKind::NotFound => "not_found",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::UpstreamError => "upstream_error",
            ErrorKind::CorruptState | ErrorKind::Internal => "internal_error",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: Option<&'a str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.kind == ErrorKind::Internal || self.kind == ErrorKind::CorruptState {
            tracing::error!(target: "factcheck_server::handler", kind = ?self.kind, message = ?self.message, "request failed");
        } else {
            tracing::debug!(target: "factcheck_server::handler", kind = ?self.kind, message = ?self.message, "request rejected");
        }

        let body = ErrorBody {
            error: self.code(),
            message: self.message.as_deref(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<factcheck_core::Error> for ApiError {
    fn from(error: factcheck_core::Error) -> Self {
        Self::new(error.kind)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
