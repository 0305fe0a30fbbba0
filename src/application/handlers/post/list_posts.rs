//! ListPosts - Query handler for a user's recent posts.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::post::Post;
use crate::ports::PostRepository;

/// Maximum number of posts returned per listing.
const MAX_POSTS: i64 = 20;

/// Query for a user's posts across all categories.
#[derive(Debug, Clone)]
pub struct ListPostsQuery {
    pub user_id: UserId,
}

/// Handler for listing posts.
pub struct ListPostsHandler {
    posts: Arc<dyn PostRepository>,
}

impl ListPostsHandler {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn handle(&self, query: ListPostsQuery) -> Result<Vec<Post>, DomainError> {
        self.posts.list_recent(&query.user_id, MAX_POSTS).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::post::test_support::MockPostRepository;
    use crate::domain::post::PostCategory;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_list_posts_returns_only_callers_posts() {
        let posts = Arc::new(
            MockPostRepository::new()
                .with_post(crate::domain::post::Post::new(user("a"), PostCategory::Outfit))
                .with_post(crate::domain::post::Post::new(user("b"), PostCategory::Shirt)),
        );
        let handler = ListPostsHandler::new(posts);

        let result = handler
            .handle(ListPostsQuery { user_id: user("a") })
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].user_id, user("a"));
    }

    #[tokio::test]
    async fn test_list_posts_caps_at_twenty() {
        let mut repo = MockPostRepository::new();
        for _ in 0..25 {
            repo = repo.with_post(crate::domain::post::Post::new(
                user("a"),
                PostCategory::Hoodie,
            ));
        }
        let handler = ListPostsHandler::new(Arc::new(repo));

        let result = handler
            .handle(ListPostsQuery { user_id: user("a") })
            .await
            .unwrap();

        assert_eq!(result.len(), 20);
    }

    #[tokio::test]
    async fn test_list_posts_empty_for_unknown_user() {
        let handler = ListPostsHandler::new(Arc::new(MockPostRepository::new()));

        let result = handler
            .handle(ListPostsQuery {
                user_id: user("nobody"),
            })
            .await
            .unwrap();

        assert!(result.is_empty());
    }
}
