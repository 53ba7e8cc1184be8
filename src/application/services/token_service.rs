//! Issuing and verifying signed session tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::{PublicUser, User};
use crate::error::AppError;

/// Claims embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl From<Claims> for PublicUser {
    fn from(claims: Claims) -> Self {
        PublicUser {
            id: claims.id,
            username: claims.username,
            email: claims.email,
        }
    }
}

/// HS256 JWT issuer/verifier keyed by the server secret.
///
/// Tokens are bearer capabilities: there is no server-side revocation, a
/// token stays valid until `exp`.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Creates a service signing with `secret`; tokens live `ttl_seconds`.
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_seconds),
        }
    }

    /// Signs a token carrying the user's public identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if encoding fails.
    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|e| {
            tracing::error!(error = %e, "JWT encoding failed");
            AppError::internal("Failed to create token", json!({}))
        })
    }

    /// Verifies signature and expiry and returns the embedded claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] for malformed, tampered or expired tokens.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::warn!(error = %e, "JWT verification failed");
                AppError::forbidden(
                    "Access denied: invalid or expired token",
                    json!({ "reason": "Token verification failed" }),
                )
            })
    }
}
