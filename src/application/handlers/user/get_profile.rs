//! GetProfile - Query handler for public profile pages.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::user::UserProfile;
use crate::ports::UserRepository;

/// Query for a public profile by username.
#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub username: String,
}

/// Handler for public profile lookups.
pub struct GetProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl GetProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetProfileQuery) -> Result<UserProfile, DomainError> {
        self.users
            .find_by_username(&query.username)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))
    }
}
