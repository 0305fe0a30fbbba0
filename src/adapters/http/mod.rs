//! HTTP adapters - REST API implementations.
//!
//! Each resource has its own module with dto/handlers/routes; the
//! middleware module carries session validation.

pub mod middleware;
pub mod post;
pub mod user;

use axum::{middleware::from_fn_with_state, Router};

use middleware::{auth_middleware, AuthState};

pub use post::{post_routes, PostHandlers};
pub use user::{user_routes, UserHandlers};

/// Assembles the full API router.
///
/// All routes live under `/api`. The auth middleware runs on every
/// request; public routes simply never ask for the authenticated user.
pub fn api_router(
    post_handlers: PostHandlers,
    user_handlers: UserHandlers,
    validator: AuthState,
) -> Router {
    let api = post_routes(post_handlers).merge(user_routes(user_handlers));

    Router::new()
        .nest("/api", api)
        .layer(from_fn_with_state(validator, auth_middleware))
}
