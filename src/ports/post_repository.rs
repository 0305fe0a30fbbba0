//! PostRepository port for post persistence and counter bookkeeping.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PostId, UserId};
use crate::domain::post::Post;

/// Repository for posts.
///
/// Counter bookkeeping is part of the contract: create and delete adjust
/// the owner's per-category counter and image counter in the same
/// transaction as the post row, so the denormalized counts always match
/// the actual rows.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Inserts the post and increments the matching counters atomically.
    async fn create(&self, post: &Post) -> Result<(), DomainError>;

    /// Looks a post up by id AND owner.
    ///
    /// Returns `Ok(None)` both when the post does not exist and when it is
    /// owned by someone else, so callers cannot distinguish the two.
    async fn find_owned(&self, id: &PostId, owner: &UserId)
        -> Result<Option<Post>, DomainError>;

    /// Deletes the post and decrements the matching counters atomically.
    async fn delete(&self, post: &Post) -> Result<(), DomainError>;

    /// Returns up to `limit` posts for a user, newest first.
    async fn list_recent(&self, user_id: &UserId, limit: i64)
        -> Result<Vec<Post>, DomainError>;
}
