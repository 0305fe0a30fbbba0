//! HTTP routes for post endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{create_post, delete_post, list_posts, PostHandlers};

/// Creates the post router with all endpoints.
pub fn post_routes(handlers: PostHandlers) -> Router {
    Router::new()
        .route("/posts", post(create_post))
        .route("/posts/:id", delete(delete_post))
        .route("/users/:user_id/posts", get(list_posts))
        .with_state(handlers)
}
