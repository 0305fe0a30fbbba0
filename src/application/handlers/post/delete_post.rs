//! DeletePost - Command handler for removing a post.

use std::sync::Arc;

use crate::application::cleanup::ImageCleanup;
use crate::domain::foundation::{DomainError, PostId, UserId};
use crate::ports::PostRepository;

/// Command to delete a post owned by the caller.
#[derive(Debug, Clone)]
pub struct DeletePostCommand {
    pub user_id: UserId,
    pub post_id: PostId,
}

/// Result of post deletion.
#[derive(Debug, Clone)]
pub struct DeletePostResult {
    pub deleted_post_id: PostId,
}

/// Handler for deleting posts.
pub struct DeletePostHandler {
    posts: Arc<dyn PostRepository>,
    cleanup: ImageCleanup,
}

impl DeletePostHandler {
    pub fn new(posts: Arc<dyn PostRepository>, cleanup: ImageCleanup) -> Self {
        Self { posts, cleanup }
    }

    pub async fn handle(&self, cmd: DeletePostCommand) -> Result<DeletePostResult, DomainError> {
        // 1. Look the post up scoped to the caller. Someone else's post and
        //    a missing post are indistinguishable here.
        let post = self
            .posts
            .find_owned(&cmd.post_id, &cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Invalid post"))?;

        // 2. Delete the row and decrement the category counter atomically
        self.posts.delete(&post).await?;

        // 3. The stored object goes away in the background; the API call
        //    does not wait on object storage
        self.cleanup.schedule(post.image_key());

        Ok(DeletePostResult {
            deleted_post_id: post.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::s3::InMemoryImageStore;
    use crate::application::handlers::post::test_support::MockPostRepository;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::post::{Post, PostCategory};

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn handler_with(
        posts: Arc<MockPostRepository>,
        store: &InMemoryImageStore,
    ) -> DeletePostHandler {
        DeletePostHandler::new(posts, ImageCleanup::new(Arc::new(store.clone())))
    }

    #[tokio::test]
    async fn test_delete_own_post_succeeds() {
        let post = Post::new(user("user-1"), PostCategory::Shoes);
        let post_id = post.id;
        let posts = Arc::new(MockPostRepository::new().with_post(post));
        let store = InMemoryImageStore::new();
        let handler = handler_with(posts.clone(), &store);

        let result = handler
            .handle(DeletePostCommand {
                user_id: user("user-1"),
                post_id,
            })
            .await
            .unwrap();

        assert_eq!(result.deleted_post_id, post_id);
        assert_eq!(posts.deleted_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_someone_elses_post_reads_as_missing() {
        let post = Post::new(user("owner"), PostCategory::Watch);
        let post_id = post.id;
        let posts = Arc::new(MockPostRepository::new().with_post(post));
        let store = InMemoryImageStore::new();
        let handler = handler_with(posts.clone(), &store);

        let result = handler
            .handle(DeletePostCommand {
                user_id: user("intruder"),
                post_id,
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.contains("Invalid post"));
        assert_eq!(posts.deleted_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_schedules_storage_cleanup() {
        let post = Post::new(user("user-1"), PostCategory::Pants);
        let key = post.image_key();
        let post_id = post.id;
        let posts = Arc::new(MockPostRepository::new().with_post(post));
        let store = InMemoryImageStore::new();
        let handler = handler_with(posts, &store);

        handler
            .handle(DeletePostCommand {
                user_id: user("user-1"),
                post_id,
            })
            .await
            .unwrap();

        // The deletion runs on a background task
        for _ in 0..100 {
            if !store.deleted_keys().await.is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert_eq!(store.deleted_keys().await, vec![key.as_str().to_string()]);
    }
}
