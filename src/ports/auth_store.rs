//! AuthStore port - the adapter contract required by the authentication
//! library.
//!
//! The auth library handles sign-in flows itself; this port only maps its
//! required operations (user, account, session, and verification-token
//! CRUD) onto relational storage. Lookups return `Ok(None)` for absence,
//! never an error.

use async_trait::async_trait;

use crate::domain::auth::{Account, AccountKey, NewUser, Session, UserPatch, VerificationToken};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::UserProfile;

/// Relational backing for the authentication library.
#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Inserts a user with a freshly generated id and returns the row.
    async fn create_user(&self, profile: NewUser) -> Result<UserProfile, DomainError>;

    /// Point lookup by id.
    async fn get_user(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError>;

    /// Point lookup by email.
    async fn get_user_by_email(&self, email: &str)
        -> Result<Option<UserProfile>, DomainError>;

    /// Resolves the user linked to an external account, if any.
    async fn get_user_by_account(&self, key: &AccountKey)
        -> Result<Option<UserProfile>, DomainError>;

    /// Applies a partial update and returns the resulting row.
    async fn update_user(&self, patch: UserPatch) -> Result<UserProfile, DomainError>;

    /// Deletes the user together with all their sessions and account links,
    /// in one transaction. Posts are intentionally left in place.
    async fn delete_user(&self, id: &UserId) -> Result<(), DomainError>;

    /// Links an external account to a user.
    async fn link_account(&self, account: Account) -> Result<(), DomainError>;

    /// Removes an external account link.
    async fn unlink_account(&self, key: &AccountKey) -> Result<(), DomainError>;

    /// Inserts a session and returns the stored row.
    async fn create_session(&self, session: Session) -> Result<Session, DomainError>;

    /// Resolves a session and its user in a single joined lookup.
    async fn get_session_and_user(
        &self,
        session_token: &str,
    ) -> Result<Option<(Session, UserProfile)>, DomainError>;

    /// Updates a session by token and returns the resulting row, or `None`
    /// if the session vanished in between.
    async fn update_session(&self, session: Session)
        -> Result<Option<Session>, DomainError>;

    /// Deletes a session by token.
    async fn delete_session(&self, session_token: &str) -> Result<(), DomainError>;

    /// Inserts a verification token and returns the stored row.
    async fn create_verification_token(
        &self,
        token: VerificationToken,
    ) -> Result<VerificationToken, DomainError>;

    /// Consumes a verification token atomically.
    ///
    /// The lookup and delete are a single conditional delete-returning
    /// statement; of two concurrent consumers, exactly one observes the
    /// token. Returns `Ok(None)` if the token was already consumed or
    /// never existed.
    async fn use_verification_token(
        &self,
        identifier: &str,
        token: &str,
    ) -> Result<Option<VerificationToken>, DomainError>;
}
