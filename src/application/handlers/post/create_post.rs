//! CreatePost - Command handler for publishing a new post.

use std::sync::Arc;

use tracing::error;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::post::{Post, PostCategory};
use crate::ports::{ImageStore, PostRepository};

/// Command to create a post in a category.
#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub user_id: UserId,
    pub category: PostCategory,
}

/// Result of post creation: the stored post plus a one-shot upload URL
/// the client PUTs the image bytes to.
#[derive(Debug, Clone)]
pub struct CreatePostResult {
    pub post: Post,
    pub upload_url: String,
}

/// Handler for creating posts.
pub struct CreatePostHandler {
    posts: Arc<dyn PostRepository>,
    images: Arc<dyn ImageStore>,
}

impl CreatePostHandler {
    pub fn new(posts: Arc<dyn PostRepository>, images: Arc<dyn ImageStore>) -> Self {
        Self { posts, images }
    }

    pub async fn handle(&self, cmd: CreatePostCommand) -> Result<CreatePostResult, DomainError> {
        // 1. Derive the post and its image key from the caller + current time
        let post = Post::new(cmd.user_id, cmd.category);

        // 2. Sign the upload URL before touching the database; a failed
        //    signature means no row should exist
        let upload_url = match self.images.signed_upload_url(&post.image_key()).await {
            Ok(url) => url,
            Err(e) => {
                error!(key = post.image_key().as_str(), error = %e, "Failed to sign upload URL");
                return Err(DomainError::validation("image", "Invalid image"));
            }
        };

        // 3. Insert the row and bump the category counter atomically.
        //    If this fails the signed URL is simply abandoned; it expires
        //    on its own within seconds.
        self.posts.create(&post).await?;

        Ok(CreatePostResult { post, upload_url })
    }
}
