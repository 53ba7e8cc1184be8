//! Banner and fallback handlers.

use axum::http::StatusCode;

/// `GET /` liveness banner.
pub async fn root_handler() -> &'static str {
    "API server is running."
}

/// Plain-text 404 for every unmatched route.
pub async fn fallback_handler() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found.")
}
