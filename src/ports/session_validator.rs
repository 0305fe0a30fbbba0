//! Session validation port.
//!
//! Resolves an opaque session token to an authenticated user. The
//! production implementation is DB-backed (via `AuthStore`); tests use a
//! mock.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates session tokens and extracts user identity.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidSession` for unknown tokens
/// - Return `AuthError::SessionExpired` for sessions past their expiry
/// - Return `AuthError::StoreUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a session token and return the authenticated user.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
