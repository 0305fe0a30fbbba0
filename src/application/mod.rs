//! Application layer: command/query handlers and background work.

pub mod cleanup;
pub mod handlers;

pub use cleanup::ImageCleanup;
