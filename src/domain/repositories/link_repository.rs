//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link with a click count of zero.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists the links owned by `user_id`, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_owner(&self, user_id: i64) -> Result<Vec<Link>, AppError>;

    /// Adds one to the click counter of the link with the given id.
    ///
    /// Returns `Ok(false)` if no such link exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_clicks(&self, link_id: i64) -> Result<bool, AppError>;

    /// Counts all links.
    async fn count(&self) -> Result<i64, AppError>;

    /// Sums click counters across all links.
    async fn total_clicks(&self) -> Result<i64, AppError>;

    /// Round-trips to the store; used by the health check.
    async fn ping(&self) -> Result<(), AppError>;
}
