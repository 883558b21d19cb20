//! `POST /api/v1/stream-claim`
//!
//! Streams NDJSON progress/claim/done events for a job. Always upgrades to
//! a `200 application/x-ndjson` body, even for an unknown or expired
//! `jobId` - that case is reported as an `error` event inside the stream
//! by the orchestrator, not as an HTTP error. A client that reconnects
//! (new TCP connection, same `jobId`) gets caught up by the orchestrator's
//! replay step rather than seeing duplicated claims.

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use serde::Deserialize;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

use crate::handler::error::ApiResult;
use crate::service;
use crate::state::ServiceState;

/// Cancels the orchestrator as soon as this stream is dropped - the normal
/// case being the client disconnecting mid-stream, which drops the
/// response body and this wrapper along with it.
struct CancelOnDrop {
    inner: ReceiverStream<Bytes>,
    cancel: CancellationToken,
}

impl Stream for CancelOnDrop {
    type Item = Bytes;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[derive(Deserialize)]
pub struct StreamClaimsRequest {
    #[serde(rename = "jobId")]
    pub job_id: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

#[tracing::instrument(skip_all, target = "factcheck_server::handler", fields(job_id = %request.job_id))]
pub async fn stream_claims(State(state): State<ServiceState>, Json(request): Json<StreamClaimsRequest>) -> ApiResult<Response> {
    let claim_stream = service::stream_claims(state, request.job_id, request.api_key);
    let guarded = CancelOnDrop {
        inner: claim_stream.body,
        cancel: claim_stream.cancel,
    };
    let body = Body::from_stream(guarded.map(Ok::<_, std::io::Error>));

    let response = Response::builder()
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .body(body)
        .expect("a static header set never fails to build a response");

    Ok(response.into_response())
}
