//! Outermost layer: catches panics and bounds total request time.
//!
//! `/stream-claim` responses are long-lived by design, so the timeout here
//! is generous; it exists to bound runaway requests, not to cap normal
//! streaming duration.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;

use crate::state::ServiceState;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15 * 60);

fn handle_panic(_: Box<dyn std::any::Any + Send>) -> axum::response::Response {
    tracing::error!(target: "factcheck_server::middleware", "request handler panicked");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

pub fn apply(router: Router<ServiceState>) -> Router<ServiceState> {
    router
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CatchPanicLayer::custom(handle_panic))
}
