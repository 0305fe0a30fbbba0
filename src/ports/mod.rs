//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.

mod auth_store;
mod image_store;
mod post_repository;
mod session_validator;
mod user_repository;

pub use auth_store::AuthStore;
pub use image_store::{ImageStore, StorageError, UPLOAD_URL_EXPIRY_SECS};
pub use post_repository::PostRepository;
pub use session_validator::SessionValidator;
pub use user_repository::UserRepository;
