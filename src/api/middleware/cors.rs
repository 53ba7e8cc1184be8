//! Cross-origin access for browser clients.

use axum::{
    body::Body,
    extract::Request,
    http::{Method, StatusCode, header},
    middleware::Next,
    response::Response,
};
use tower_http::cors::{Any, CorsLayer};

/// Allows any origin to call the API with `GET`, `POST` and `OPTIONS`,
/// sending `Content-Type` and `Authorization` headers.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Answers every `OPTIONS` request with `204 No Content` and an empty body.
///
/// Runs outside [`layer`], so CORS headers set on preflight responses are kept.
pub async fn answer_options(req: Request, next: Next) -> Response {
    let is_options = req.method() == Method::OPTIONS;
    let response = next.run(req).await;

    if !is_options {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    parts.status = StatusCode::NO_CONTENT;
    parts.headers.remove(header::CONTENT_TYPE);
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, Body::empty())
}
