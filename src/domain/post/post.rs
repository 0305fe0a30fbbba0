//! Post entity and image key derivation.

use std::fmt;

use crate::domain::foundation::{ImageId, PostId, Timestamp, UserId};

use super::PostCategory;

/// An image post owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub category: PostCategory,
    pub image: ImageId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Post {
    /// Creates a fresh post for a user, deriving a new image id from the
    /// current time.
    pub fn new(user_id: UserId, category: PostCategory) -> Self {
        let now = Timestamp::now();
        let image = ImageId::derive(&user_id, now.epoch_millis());
        Self {
            id: PostId::new(),
            user_id,
            category,
            image,
            created_at: now,
            updated_at: now,
        }
    }

    /// The object-storage key this post's image lives under.
    pub fn image_key(&self) -> ImageKey {
        ImageKey::new(&self.user_id, &self.image)
    }
}

/// Object-storage key for an uploaded image: `{user_id}/{image_id}.png`.
///
/// Keys are namespaced per user so a pre-signed URL can never touch another
/// user's objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageKey(String);

impl ImageKey {
    /// Builds the key for a user's image.
    pub fn new(user_id: &UserId, image: &ImageId) -> Self {
        Self(format!("{}/{}.png", user_id, image))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
