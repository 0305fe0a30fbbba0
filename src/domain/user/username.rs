//! Username validation rules.
//!
//! Usernames double as profile-page path segments, so a handful of route
//! names and the API prefix are off limits.

use crate::domain::foundation::ValidationError;

/// Route names a username may not collide with.
const RESERVED_USERNAMES: [&str; 3] = ["login", "settings", "onboarding"];

/// Path prefix reserved for the API.
const RESERVED_PREFIX: &str = "api/";

/// Minimum username length.
const MIN_LENGTH: usize = 3;

/// Validates a requested username against the reserved list, the reserved
/// path prefix, and the minimum length.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if RESERVED_USERNAMES.contains(&username) {
        return Err(ValidationError::invalid_format(
            "username",
            "username is reserved",
        ));
    }
    if username.starts_with(RESERVED_PREFIX) {
        return Err(ValidationError::invalid_format(
            "username",
            "username may not start with 'api/'",
        ));
    }
    if username.chars().count() < MIN_LENGTH {
        return Err(ValidationError::too_short(
            "username",
            MIN_LENGTH,
            username.chars().count(),
        ));
    }
    Ok(())
}
