//! Request extractors shared by API handlers.

use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` with rejections mapped to [`AppError`], so malformed or
/// mistyped bodies produce the standard 400 error body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
