//! Domain layer - pure types with no infrastructure dependencies.

pub mod auth;
pub mod foundation;
pub mod post;
pub mod user;
