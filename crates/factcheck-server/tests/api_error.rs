use axum::response::IntoResponse;
use factcheck_core::ErrorKind;
use factcheck_server::handler::error::ApiError;

#[test]
fn not_found_maps_to_404() {
    let response = ApiError::new(ErrorKind::NotFound).with_message("unknown jobId").into_response();
    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[test]
fn rate_limited_maps_to_429() {
    let response = ApiError::new(ErrorKind::RateLimited).into_response();
    assert_eq!(response.status(), axum::http::StatusCode::TOO_MANY_REQUESTS);
}

#[test]
fn internal_maps_to_500() {
    let response = ApiError::new(ErrorKind::Internal).into_response();
    assert_eq!(response.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn healthz_returns_ok() {
    use axum::http::StatusCode;

    let status = factcheck_server::handler::healthz().await;
    assert_eq!(status, StatusCode::OK);
}
