//! HTTP adapter for user and profile endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::UserHandlers;
pub use routes::user_routes;
