//! Record types exchanged with the auth library through the `AuthStore`
//! port.
//!
//! These mirror the adapter contract of a DB-session authentication
//! library: users, provider-linked accounts, server-side sessions, and
//! one-time verification tokens.

use crate::domain::foundation::{ImageId, Timestamp, UserId};

/// Profile data supplied by the auth library when a user first signs in.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: Option<String>,
    pub username: String,
    pub email: String,
    pub email_verified: Option<Timestamp>,
    pub image: Option<ImageId>,
}

/// Partial user update applied by the auth library (e.g. refreshed email
/// verification).
///
/// Absent (`None`) fields are left unchanged; a patch cannot clear a
/// field back to NULL. Clearing the profile image goes through
/// `UserRepository::clear_image`, and no auth flow needs to unset the
/// other nullable fields.
#[derive(Debug, Clone)]
pub struct UserPatch {
    pub id: UserId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub email_verified: Option<Timestamp>,
    pub image: Option<ImageId>,
}

impl UserPatch {
    /// A patch touching nothing but carrying the target id.
    pub fn empty(id: UserId) -> Self {
        Self {
            id,
            name: None,
            email: None,
            email_verified: None,
            image: None,
        }
    }
}

/// Link between a user and an external identity provider, keyed by
/// (provider, provider_account_id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub user_id: UserId,
    pub kind: String,
    pub provider: String,
    pub provider_account_id: String,
    pub refresh_token: Option<String>,
    pub access_token: Option<String>,
    pub expires_at: Option<i64>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub id_token: Option<String>,
    pub session_state: Option<String>,
}

/// Compound key identifying an account link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountKey {
    pub provider: String,
    pub provider_account_id: String,
}

impl AccountKey {
    pub fn new(provider: impl Into<String>, provider_account_id: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            provider_account_id: provider_account_id.into(),
        }
    }
}

/// Server-side session record keyed by its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_token: String,
    pub user_id: UserId,
    pub expires: Timestamp,
}

impl Session {
    /// Returns true if the session's expiry lies in the past.
    pub fn is_expired(&self) -> bool {
        self.expires.is_past()
    }
}

/// One-time token proving control of an identifier, keyed by
/// (identifier, token).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationToken {
    pub identifier: String,
    pub token: String,
    pub expires: Timestamp,
}
