//! Post command and query handlers.

mod create_post;
mod delete_post;
mod list_posts;

pub use create_post::{CreatePostCommand, CreatePostHandler, CreatePostResult};
pub use delete_post::{DeletePostCommand, DeletePostHandler, DeletePostResult};
pub use list_posts::{ListPostsHandler, ListPostsQuery};
