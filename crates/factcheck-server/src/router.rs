//! Route registration and the middleware application order.

use axum::routing::{get, post};
use axum::Router;

use crate::handler;
use crate::middleware::{MiddlewareConfig, RouterExt};
use crate::state::ServiceState;

pub fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    let routes = Router::new()
        .route("/healthz", get(handler::healthz))
        .route("/api/v1/validate-api-key", post(handler::validate_api_key))
        .route("/api/v1/upload-paper", post(handler::upload_paper))
        .route("/api/v1/stream-claim", post(handler::stream_claims))
        .route("/api/v1/verify-claim", post(handler::verify_claim));

    routes
        .with_security(middleware)
        .with_observability()
        .with_recovery()
        .with_state(state)
}
