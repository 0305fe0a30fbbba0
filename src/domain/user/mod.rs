//! User domain: profile entity, counters, and username rules.

mod profile;
mod username;

pub use profile::{PostCounts, ProfileUpdate, UserProfile};
pub use username::validate_username;
