//! User profile entity and per-category post counters.

use crate::domain::foundation::{ImageId, Timestamp, UserId};
use crate::domain::post::PostCategory;

/// Denormalized post counters kept on the user row.
///
/// Each per-category counter equals the count of that user's posts of that
/// category; the post repository adjusts them in the same transaction as
/// the post row so they cannot drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostCounts {
    pub outfit: i32,
    pub hoodie: i32,
    pub shirt: i32,
    pub pants: i32,
    pub shoes: i32,
    pub watch: i32,
    pub images: i32,
    pub likes: i32,
}

impl PostCounts {
    /// Returns the counter for a category.
    pub fn for_category(&self, category: PostCategory) -> i32 {
        match category {
            PostCategory::Outfit => self.outfit,
            PostCategory::Hoodie => self.hoodie,
            PostCategory::Shirt => self.shirt,
            PostCategory::Pants => self.pants,
            PostCategory::Shoes => self.shoes,
            PostCategory::Watch => self.watch,
        }
    }
}

/// Full user row as persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: Option<String>,
    pub username: String,
    pub email: String,
    pub email_verified: Option<Timestamp>,
    pub image: Option<ImageId>,
    pub onboarded: bool,
    pub counts: PostCounts,
}

/// Partial profile update applied by `edit_profile`.
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
}

impl ProfileUpdate {
    /// Returns true if the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.username.is_none()
    }
}
