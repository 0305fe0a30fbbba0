//! UserRepository port for profile persistence operations.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ImageId, UserId};
use crate::domain::user::{ProfileUpdate, UserProfile};

/// Repository for the profile-facing side of the users table.
///
/// The auth library's own user operations live on the `AuthStore` port;
/// this trait covers what the profile service needs.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Point lookup by user id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError>;

    /// Point lookup by username.
    async fn find_by_username(&self, username: &str)
        -> Result<Option<UserProfile>, DomainError>;

    /// Existence check by username.
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError>;

    /// Sets the onboarded flag. Idempotent.
    async fn mark_onboarded(&self, id: &UserId) -> Result<(), DomainError>;

    /// Applies a partial name/username update.
    ///
    /// A uniqueness violation on username or email surfaces as
    /// `ErrorCode::Conflict`.
    async fn update_profile(&self, id: &UserId, update: &ProfileUpdate)
        -> Result<(), DomainError>;

    /// Replaces the profile image id.
    async fn set_image(&self, id: &UserId, image: &ImageId) -> Result<(), DomainError>;

    /// Clears the profile image id.
    async fn clear_image(&self, id: &UserId) -> Result<(), DomainError>;
}
