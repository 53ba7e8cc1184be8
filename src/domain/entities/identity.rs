//! Caller identity resolved per request.

use serde_json::json;

use super::user::PublicUser;
use crate::error::AppError;

/// Who is making a request.
///
/// Requests without a bearer token are [`Identity::Anonymous`]; a verified
/// token yields [`Identity::User`]. An invalid token never reaches this type,
/// it is rejected during extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    User(PublicUser),
}

impl Identity {
    /// Id of the authenticated user, if any.
    pub fn user_id(&self) -> Option<i64> {
        match self {
            Identity::Anonymous => None,
            Identity::User(user) => Some(user.id),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }

    /// Returns the authenticated user or an `Unauthorized` error.
    pub fn require_user(&self) -> Result<&PublicUser, AppError> {
        match self {
            Identity::User(user) => Ok(user),
            Identity::Anonymous => Err(AppError::unauthorized(
                "Authentication required",
                json!({ "reason": "Authorization header is missing" }),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> PublicUser {
        PublicUser {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[test]
    fn test_anonymous() {
        let identity = Identity::Anonymous;

        assert!(identity.is_anonymous());
        assert_eq!(identity.user_id(), None);
        assert!(matches!(
            identity.require_user(),
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_user() {
        let identity = Identity::User(alice());

        assert!(!identity.is_anonymous());
        assert_eq!(identity.user_id(), Some(1));
        assert_eq!(identity.require_user().unwrap().username, "alice");
    }
}
