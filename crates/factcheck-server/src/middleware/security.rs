//! CORS and request-body size limiting.

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;

use crate::state::ServiceState;

/// Configuration for the outermost, client-facing middleware.
#[derive(Debug, Clone, clap::Parser)]
pub struct MiddlewareConfig {
    /// Origin allowed to call this API from a browser.
    #[clap(long, env = "ALLOWED_ORIGIN")]
    pub allowed_origin: String,

    /// Maximum accepted upload size, in megabytes.
    #[clap(long, env = "MAX_FILE_MB", default_value_t = 25)]
    pub max_file_mb: u64,
}

pub fn apply(router: Router<ServiceState>, config: &MiddlewareConfig) -> Router<ServiceState> {
    let origin = config
        .allowed_origin
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| HeaderValue::from_static("null"));

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(tower_http::cors::Any);

    router
        .layer(RequestBodyLimitLayer::new((config.max_file_mb as usize) * 1024 * 1024))
        .layer(cors)
}
