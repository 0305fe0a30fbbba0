//! HTTP adapter for post endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::PostHandlers;
pub use routes::post_routes;
