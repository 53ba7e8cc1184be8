//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`            - Banner
//! - `GET  /health`      - Health check: database, click queue
//! - `GET  /{code}`      - Short link redirect
//! - `/api/*`            - REST API
//!
//! Anything else gets a plain-text 404.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin; every `OPTIONS` request answered with 204
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{fallback_handler, health_handler, redirect_handler, root_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path normalization.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .fallback(fallback_handler)
        .with_state(state)
        .layer(cors::layer())
        .layer(middleware::from_fn(cors::answer_options))
        .layer(tracing::layer())
}

/// Constructs the application service: [`api_router`] with trailing slashes trimmed.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(api_router(state))
}
