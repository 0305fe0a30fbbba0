//! HTTP handlers for post endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::post::{
    CreatePostCommand, CreatePostHandler, DeletePostCommand, DeletePostHandler,
    ListPostsHandler, ListPostsQuery,
};
use crate::domain::foundation::{DomainError, ErrorCode, PostId, UserId};

use super::dto::{
    CreatePostRequest, CreatePostResponse, DeletePostResponse, ErrorResponse, PostResponse,
    PostsResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PostHandlers {
    create_handler: Arc<CreatePostHandler>,
    delete_handler: Arc<DeletePostHandler>,
    list_handler: Arc<ListPostsHandler>,
}

impl PostHandlers {
    pub fn new(
        create_handler: Arc<CreatePostHandler>,
        delete_handler: Arc<DeletePostHandler>,
        list_handler: Arc<ListPostsHandler>,
    ) -> Self {
        Self {
            create_handler,
            delete_handler,
            list_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/posts - Create a post and sign its upload URL
pub async fn create_post(
    State(handlers): State<PostHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<CreatePostRequest>,
) -> Response {
    let cmd = CreatePostCommand {
        user_id: user.id,
        category: req.category,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(result) => {
            let response = CreatePostResponse {
                post: result.post.into(),
                upload_url: result.upload_url,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_post_error(e),
    }
}

/// DELETE /api/posts/{id} - Delete a post owned by the caller
pub async fn delete_post(
    State(handlers): State<PostHandlers>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    // A malformed id reads the same as a missing post
    let post_id = match id.parse::<PostId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found("Invalid post")),
            )
                .into_response()
        }
    };

    let cmd = DeletePostCommand {
        user_id: user.id,
        post_id,
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(result) => {
            let response = DeletePostResponse {
                deleted: true,
                post_id: result.deleted_post_id.to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_post_error(e),
    }
}

/// GET /api/users/{id}/posts - List a user's recent posts
pub async fn list_posts(
    State(handlers): State<PostHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match UserId::new(user_id) {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    match handlers.list_handler.handle(ListPostsQuery { user_id }).await {
        Ok(posts) => {
            let response = PostsResponse {
                posts: posts.into_iter().map(PostResponse::from).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_post_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_post_error(error: DomainError) -> Response {
    match error.code {
        ErrorCode::ValidationFailed => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.message)),
        )
            .into_response(),
        ErrorCode::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(error.message)),
        )
            .into_response(),
        ErrorCode::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                code: "UNAUTHORIZED".to_string(),
                message: error.message,
                details: None,
            }),
        )
            .into_response(),
        ErrorCode::Forbidden => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                code: "FORBIDDEN".to_string(),
                message: error.message,
                details: None,
            }),
        )
            .into_response(),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal("Something went wrong")),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_error_validation_maps_to_400() {
        let error = DomainError::validation("image", "Invalid image");
        let response = handle_post_error(error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn post_error_not_found_maps_to_404() {
        let error = DomainError::not_found("Invalid post");
        let response = handle_post_error(error);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn post_error_database_maps_to_500() {
        let error = DomainError::new(ErrorCode::DatabaseError, "connection lost");
        let response = handle_post_error(error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
