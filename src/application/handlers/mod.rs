//! Command and query handlers, one per operation.

pub mod post;
pub mod user;
