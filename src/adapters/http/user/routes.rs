//! HTTP routes for user and profile endpoints.

use axum::{
    routing::{delete, get, patch, put},
    Router,
};

use super::handlers::{
    delete_image, edit_profile, get_me, get_profile, profile_exists, set_image, UserHandlers,
};

/// Creates the user router with all endpoints.
pub fn user_routes(handlers: UserHandlers) -> Router {
    Router::new()
        .route("/me", get(get_me))
        .route("/me", patch(edit_profile))
        .route("/me/image", put(set_image))
        .route("/me/image", delete(delete_image))
        .route("/profiles/:username", get(get_profile))
        .route("/profiles/:username/exists", get(profile_exists))
        .with_state(handlers)
}
