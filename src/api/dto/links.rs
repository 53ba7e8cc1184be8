//! DTOs for shortening and listing links.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for `POST /api/shorten`.
///
/// URL syntax is checked by the link service, which also rejects the
/// empty string a missing field defaults to.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[serde(default)]
    pub long_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: String,
    pub message: String,
}

/// Response body for `GET /api/urls`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UrlListResponse {
    pub message: String,
    pub urls: Vec<UrlItem>,
}

/// One of the caller's links with its click counter.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlItem {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}
