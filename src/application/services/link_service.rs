//! Link creation, resolution and listing.

use std::sync::Arc;

use serde_json::json;
use url::Url;

use crate::domain::entities::{Identity, Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_reserved_code};

/// Total code candidates tried per shorten request.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 5;

/// Service for creating and retrieving shortened links.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the externally reachable address short codes are
    /// appended to, e.g. `http://localhost:3000`.
    pub fn new(link_repository: Arc<dyn LinkRepository>, base_url: impl Into<String>) -> Self {
        Self {
            link_repository,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a short link for `long_url`.
    ///
    /// The owner is taken from `identity`; anonymous links have no owner.
    /// `long_url` is stored exactly as given.
    ///
    /// # Code Allocation
    ///
    /// Up to [`MAX_ALLOCATION_ATTEMPTS`] random codes are tried. A candidate is
    /// skipped if it already exists, and an insert that loses a race on the
    /// unique short-code constraint also consumes an attempt.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty or not absolute.
    /// Returns [`AppError::Internal`] if allocation is exhausted or the store fails.
    pub async fn shorten(
        &self,
        long_url: &str,
        identity: &Identity,
        ip_address: String,
    ) -> Result<Link, AppError> {
        validate_long_url(long_url)?;

        let mut attempts = 0;
        loop {
            let code = self.next_free_code(&mut attempts).await?;

            let new_link = NewLink {
                code,
                long_url: long_url.to_string(),
                user_id: identity.user_id(),
                ip_address: ip_address.clone(),
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    tracing::info!(
                        code = %link.code,
                        anonymous = link.is_anonymous(),
                        "Short link created"
                    );
                    return Ok(link);
                }
                Err(AppError::Conflict { .. }) => {
                    tracing::warn!(attempts, "Short code taken concurrently, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Finds a code not yet present in the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] after [`MAX_ALLOCATION_ATTEMPTS`] collisions.
    pub async fn allocate(&self) -> Result<String, AppError> {
        let mut attempts = 0;
        self.next_free_code(&mut attempts).await
    }

    /// Shared attempt budget between the existence pre-check and insert retries.
    async fn next_free_code(&self, attempts: &mut usize) -> Result<String, AppError> {
        while *attempts < MAX_ALLOCATION_ATTEMPTS {
            *attempts += 1;
            let code = generate_code();

            if is_reserved_code(&code) {
                continue;
            }

            if self.link_repository.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }

            tracing::debug!(code = %code, "Short code collision");
        }

        tracing::error!(
            attempts = MAX_ALLOCATION_ATTEMPTS,
            "Short code allocation exhausted"
        );
        Err(AppError::internal(
            "Failed to generate a unique short code, please try again",
            json!({ "reason": "allocation exhausted", "attempts": MAX_ALLOCATION_ATTEMPTS }),
        ))
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "code": code })))
    }

    /// Lists the caller's links, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for anonymous callers.
    pub async fn list_mine(&self, identity: &Identity) -> Result<Vec<Link>, AppError> {
        let user = identity.require_user()?;
        self.link_repository.list_by_owner(user.id).await
    }

    /// Builds the externally addressable short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    /// Checks that the store answers.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }
}

/// Accepts any non-empty string that parses as an absolute URL.
///
/// Control characters are rejected up front: the parser silently drops tabs
/// and newlines, but the stored string must stay usable as a `Location` header.
fn validate_long_url(long_url: &str) -> Result<(), AppError> {
    if long_url.trim().is_empty() {
        return Err(AppError::bad_request(
            "Invalid URL format",
            json!({ "field": "longUrl", "reason": "URL is required" }),
        ));
    }

    if long_url.chars().any(|c| c.is_ascii_control()) {
        return Err(AppError::bad_request(
            "Invalid URL format",
            json!({ "field": "longUrl", "reason": "URL contains control characters" }),
        ));
    }

    Url::parse(long_url).map_err(|e| {
        AppError::bad_request(
            "Invalid URL format",
            json!({ "field": "longUrl", "reason": e.to_string() }),
        )
    })?;

    Ok(())
}
