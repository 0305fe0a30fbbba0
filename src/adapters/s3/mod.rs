//! Object-storage adapters implementing the ImageStore port.

mod image_store;
mod in_memory;

pub use image_store::S3ImageStore;
pub use in_memory::InMemoryImageStore;
