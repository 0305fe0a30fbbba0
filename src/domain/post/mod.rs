//! Post domain: categories, the post entity, and image keys.

mod category;
mod post;

pub use category::PostCategory;
pub use post::{ImageKey, Post};
