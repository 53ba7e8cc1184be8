//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_valid_code;

/// Plain-text body for unknown short codes.
pub const NOT_FOUND_MESSAGE: &str = "Short URL not found.";

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Only 6-character alphanumeric codes are looked up; any other path
/// segment gets the same 404 as an unknown code.
///
/// # Click Tracking
///
/// A click event is queued for the background worker before the response is
/// sent. The send waits for channel capacity instead of dropping the click.
///
/// # Response
///
/// - `302 Found` with `Location` set to the stored URL
/// - `404 Not Found` with a plain-text body
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    if !is_valid_code(&code) {
        return Ok(short_url_not_found());
    }

    let link = match state.link_service.resolve(&code).await {
        Ok(link) => link,
        Err(AppError::NotFound { .. }) => {
            tracing::debug!(code = %code, "Unknown short code");
            return Ok(short_url_not_found());
        }
        Err(e) => return Err(e),
    };

    if let Err(e) = state
        .click_sender
        .send(ClickEvent::new(link.id, link.code.as_str()))
        .await
    {
        tracing::error!(code = %e.0.code, "Click queue closed, click not counted");
    }

    Ok((StatusCode::FOUND, [(header::LOCATION, link.long_url)]).into_response())
}

fn short_url_not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE).into_response()
}
