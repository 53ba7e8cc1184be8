//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its owner and traffic counter.
///
/// `user_id` is `None` for links created anonymously.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub long_url: String,
    pub user_id: Option<i64>,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub ip_address: String,
}

impl Link {
    /// Creates a new Link instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        code: String,
        long_url: String,
        user_id: Option<i64>,
        click_count: i64,
        created_at: DateTime<Utc>,
        ip_address: String,
    ) -> Self {
        Self {
            id,
            code,
            long_url,
            user_id,
            click_count,
            created_at,
            ip_address,
        }
    }

    /// Returns true if nobody owns the link.
    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }

    /// Returns true if `user_id` owns the link.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == Some(user_id)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub long_url: String,
    pub user_id: Option<i64>,
    pub ip_address: String,
}
