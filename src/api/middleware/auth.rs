//! Bearer token identification.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use axum_auth::AuthBearer;

use crate::domain::entities::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves the caller of a request.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Resolution
///
/// - No `Authorization` header, a non-Bearer scheme or an empty token:
///   [`Identity::Anonymous`]
/// - Valid, unexpired token: [`Identity::User`] built from its claims
///
/// # Errors
///
/// Returns `403 Forbidden` if a Bearer token is present but fails signature
/// or expiry verification. The handler does not run.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(identity: Identity) -> impl IntoResponse {
///     match identity {
///         Identity::Anonymous => "hello stranger".to_string(),
///         Identity::User(user) => format!("hello {}", user.username),
///     }
/// }
/// ```
impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(header::AUTHORIZATION) {
            return Ok(Identity::Anonymous);
        }

        let token = match AuthBearer::from_request_parts(parts, &()).await {
            Ok(AuthBearer(token)) if !token.trim().is_empty() => token,
            _ => {
                tracing::debug!("Authorization header without a Bearer token, treating as anonymous");
                return Ok(Identity::Anonymous);
            }
        };

        let claims = state.token_service.verify(token.trim())?;
        tracing::debug!(user_id = claims.id, "Request authenticated");

        Ok(Identity::User(claims.into()))
    }
}
