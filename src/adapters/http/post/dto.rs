//! HTTP DTOs for post endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::post::{Post, PostCategory};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a post.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub category: PostCategory,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A post as exposed over the wire.
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub user_id: String,
    pub category: PostCategory,
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            user_id: post.user_id.as_str().to_string(),
            category: post.category,
            image: post.image.as_str().to_string(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Response for post creation: the stored post plus the URL the client
/// uploads the image bytes to.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePostResponse {
    pub post: PostResponse,
    pub upload_url: String,
}

/// Response for post deletion.
#[derive(Debug, Clone, Serialize)]
pub struct DeletePostResponse {
    pub deleted: bool,
    pub post_id: String,
}

/// Response for post listings.
#[derive(Debug, Clone, Serialize)]
pub struct PostsResponse {
    pub posts: Vec<PostResponse>,
}

/// Standard error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    #[test]
    fn post_response_carries_uppercase_category() {
        let post = Post::new(UserId::new("u1").unwrap(), PostCategory::Hoodie);
        let response = PostResponse::from(post);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["category"], "HOODIE");
        assert!(json["image"].as_str().unwrap().starts_with("u1-"));
    }

    #[test]
    fn create_post_request_parses_uppercase_category() {
        let req: CreatePostRequest =
            serde_json::from_str(r#"{"category": "SHOES"}"#).unwrap();
        assert_eq!(req.category, PostCategory::Shoes);
    }

    #[test]
    fn create_post_request_rejects_unknown_category() {
        let result = serde_json::from_str::<CreatePostRequest>(r#"{"category": "HAT"}"#);
        assert!(result.is_err());
    }
}
