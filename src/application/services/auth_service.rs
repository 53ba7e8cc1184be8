//! Account registration and login.

use std::sync::Arc;

use serde_json::json;

use crate::application::services::TokenService;
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};

/// Message shared by every failed login, so callers cannot tell
/// an unknown email from a wrong password.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Service for creating accounts and exchanging credentials for tokens.
///
/// Input shape (non-empty fields, email format) is validated by the request
/// DTOs before reaching this service.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or email is taken,
    /// including when a concurrent registration wins the insert.
    /// Returns [`AppError::Internal`] on hashing or database errors.
    #[tracing::instrument(name = "AuthService: register", skip(self, password))]
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        if self.users.exists(username, email).await? {
            tracing::info!("Registration rejected: username or email in use");
            return Err(taken_conflict());
        }

        let password = password.to_owned();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing task failed");
                AppError::internal("Failed to hash password", json!({}))
            })??;

        let user = self
            .users
            .create(NewUser {
                username: username.to_owned(),
                email: email.to_owned(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => taken_conflict(),
                other => other,
            })?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    /// Verifies credentials and issues a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown email or a wrong
    /// password, with the same message for both.
    #[tracing::instrument(name = "AuthService: login", skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User), AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            tracing::warn!("Login failed: user not found");
            return Err(invalid_credentials());
        };

        let password = password.to_owned();
        let stored_hash = user.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Password verification task failed");
                    AppError::internal("Failed to verify password", json!({}))
                })??;

        if !matches {
            tracing::warn!("Login failed: wrong password");
            return Err(invalid_credentials());
        }

        let token = self.tokens.issue(&user)?;

        tracing::info!(user_id = user.id, "User authenticated");
        Ok((token, user))
    }
}

fn taken_conflict() -> AppError {
    AppError::conflict(
        "Username or email already in use",
        json!({ "fields": ["username", "email"] }),
    )
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized(INVALID_CREDENTIALS, json!({}))
}
