//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user resolved from a session
//! token. They have no provider dependencies - the DB-backed session
//! validator or a test mock can both populate them via the
//! `SessionValidator` port.

use super::{ImageId, UserId};
use thiserror::Error;

/// Authenticated user resolved from a validated session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier.
    pub id: UserId,

    /// User's email address.
    pub email: String,

    /// Display name if set.
    pub display_name: Option<String>,

    /// Current profile image, if any. Needed by image-replacement flows
    /// so the previous object can be scheduled for deletion.
    pub image: Option<ImageId>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        display_name: Option<String>,
        image: Option<ImageId>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
            image,
        }
    }

    /// Returns the user's display name, or email as fallback.
    pub fn display_name_or_email(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

/// Authentication errors that can occur during session validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token does not correspond to any session.
    #[error("Invalid or expired session")]
    InvalidSession,

    /// The session exists but has expired.
    #[error("Session expired")]
    SessionExpired,

    /// Session is valid but the user no longer exists.
    #[error("User not found")]
    UserNotFound,

    /// The session store is unavailable (network, config, etc.).
    #[error("Auth store unavailable: {0}")]
    StoreUnavailable(String),
}

impl AuthError {
    /// Creates a store unavailable error with a message.
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidSession | AuthError::SessionExpired | AuthError::UserNotFound
        )
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::StoreUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user_id() -> UserId {
        UserId::new("user-123").unwrap()
    }

    #[test]
    fn authenticated_user_new_creates_user() {
        let user = AuthenticatedUser::new(
            test_user_id(),
            "test@example.com",
            Some("Test User".to_string()),
            None,
        );

        assert_eq!(user.id.as_str(), "user-123");
        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.display_name, Some("Test User".to_string()));
        assert!(user.image.is_none());
    }

    #[test]
    fn display_name_or_email_returns_name_when_present() {
        let user = AuthenticatedUser::new(
            test_user_id(),
            "test@example.com",
            Some("Alice".to_string()),
            None,
        );
        assert_eq!(user.display_name_or_email(), "Alice");
    }

    #[test]
    fn display_name_or_email_returns_email_when_no_name() {
        let user = AuthenticatedUser::new(test_user_id(), "bob@example.com", None, None);
        assert_eq!(user.display_name_or_email(), "bob@example.com");
    }

    #[test]
    fn auth_error_requires_reauthentication_for_session_errors() {
        assert!(AuthError::InvalidSession.requires_reauthentication());
        assert!(AuthError::SessionExpired.requires_reauthentication());
        assert!(AuthError::UserNotFound.requires_reauthentication());
        assert!(!AuthError::store_unavailable("").requires_reauthentication());
    }

    #[test]
    fn auth_error_is_transient_for_store_errors() {
        assert!(AuthError::store_unavailable("timeout").is_transient());
        assert!(!AuthError::InvalidSession.is_transient());
    }
}
