//! Handlers for creating and listing short links.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::links::{ShortenRequest, ShortenResponse, UrlItem, UrlListResponse};
use crate::api::extract::ApiJson;
use crate::domain::entities::Identity;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::ClientIp;

/// Creates a short link, owned by the caller when a valid token is sent.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "longUrl": "https://example.com/page" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "originalUrl": "https://example.com/page",
///   "shortUrl": "http://localhost:3000/aB3xZ9",
///   "message": "URL shortened successfully (anonymous)."
/// }
/// ```
///
/// # Errors
///
/// - `400` for an empty or invalid URL, or a malformed body
/// - `403` for an invalid or expired token
/// - `500` if no free short code could be allocated
pub async fn shorten_handler(
    State(state): State<AppState>,
    identity: Identity,
    ClientIp(ip_address): ClientIp,
    ApiJson(payload): ApiJson<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let link = state
        .link_service
        .shorten(&payload.long_url, &identity, ip_address)
        .await?;

    let message = if identity.is_anonymous() {
        "URL shortened successfully (anonymous)."
    } else {
        "URL shortened successfully."
    };

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_url: state.link_service.short_url(&link.code),
            original_url: link.long_url,
            message: message.to_string(),
        }),
    ))
}

/// Lists the caller's links, newest first.
///
/// # Endpoint
///
/// `GET /api/urls`
///
/// # Errors
///
/// - `401` without a token
/// - `403` for an invalid or expired token
pub async fn list_urls_handler(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<UrlListResponse>, AppError> {
    let links = state.link_service.list_mine(&identity).await?;

    let urls = links
        .into_iter()
        .map(|link| UrlItem {
            short_url: state.link_service.short_url(&link.code),
            original_url: link.long_url,
            short_code: link.code,
            click_count: link.click_count,
            created_at: link.created_at,
        })
        .collect();

    Ok(Json(UrlListResponse {
        message: "Shortened URLs listed successfully.".to_string(),
        urls,
    }))
}
