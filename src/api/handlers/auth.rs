//! Handlers for account registration and login.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::api::extract::ApiJson;
use crate::error::AppError;
use crate::state::AppState;

/// Creates an account.
///
/// # Endpoint
///
/// `POST /api/register`
///
/// # Request Body
///
/// ```json
/// { "username": "bob", "email": "bob@x.com", "password": "secret1" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "message": "User registered successfully.",
///   "user": { "id": 1, "username": "bob", "email": "bob@x.com" }
/// }
/// ```
///
/// # Errors
///
/// - `400` if a field is missing or the email is malformed
/// - `409` if the username or email is already registered
pub async fn register_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let payload = payload.normalized();
    payload.validate()?;

    let user = state
        .auth_service
        .register(&payload.username, &payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully.".to_string(),
            user: user.public().into(),
        }),
    ))
}

/// Exchanges email and password for a session token.
///
/// # Endpoint
///
/// `POST /api/login`
///
/// # Errors
///
/// - `400` if email or password is missing
/// - `401` if the credentials do not match, without saying which part is wrong
pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let payload = payload.normalized();
    payload.validate()?;

    let (token, user) = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful.".to_string(),
        token,
        user: user.public().into(),
    }))
}
