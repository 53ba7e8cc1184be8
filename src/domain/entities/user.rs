//! User entity representing a registered account.

use chrono::{DateTime, Utc};

/// A registered account.
///
/// `password_hash` is an argon2 PHC string. It never leaves the service layer;
/// HTTP responses expose [`PublicUser`] instead.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns the fields safe to hand to clients.
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// Client-visible identity fields of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Input data for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
