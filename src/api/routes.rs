//! API route configuration.
//!
//! Authentication is per handler: handlers that care about the caller take an
//! [`crate::domain::entities::Identity`] argument.

use crate::api::handlers::{list_urls_handler, login_handler, register_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /register` - Create an account
/// - `POST /login`    - Obtain a session token
/// - `POST /shorten`  - Create a short link (token optional)
/// - `GET  /urls`     - List the caller's links (token required)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/shorten", post(shorten_handler))
        .route("/urls", get(list_urls_handler))
}
