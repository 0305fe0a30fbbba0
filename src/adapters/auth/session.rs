//! Database-session adapter for session validation.
//!
//! This adapter implements the `SessionValidator` port against the
//! relational session store. It resolves a bearer session token by:
//!
//! 1. Fetching the session row and its user in a single joined read
//! 2. Rejecting sessions whose expiry has passed
//! 3. Mapping the stored profile to the domain `AuthenticatedUser` type
//!
//! Sessions are opaque random tokens minted by the authentication
//! library; this adapter never inspects their contents.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::{AuthStore, SessionValidator};

/// Validates session tokens against the database session store.
#[derive(Clone)]
pub struct DbSessionValidator {
    store: Arc<dyn AuthStore>,
}

impl DbSessionValidator {
    /// Creates a validator backed by the given auth store.
    pub fn new(store: Arc<dyn AuthStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionValidator for DbSessionValidator {
    async fn validate(&self, session_token: &str) -> Result<AuthenticatedUser, AuthError> {
        if session_token.is_empty() {
            return Err(AuthError::InvalidSession);
        }

        let (session, user) = self
            .store
            .get_session_and_user(session_token)
            .await
            .map_err(|e| AuthError::StoreUnavailable(e.message.clone()))?
            .ok_or(AuthError::InvalidSession)?;

        if session.is_expired() {
            debug!(user_id = %user.id, "Rejected expired session");
            return Err(AuthError::SessionExpired);
        }

        Ok(AuthenticatedUser {
            id: user.id,
            email: user.email,
            display_name: user.name,
            image: user.image,
        })
    }
}
