//! ProfileExists - Query handler for username availability checks.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::ports::UserRepository;

/// Query asking whether a username is taken.
#[derive(Debug, Clone)]
pub struct ProfileExistsQuery {
    pub username: String,
}

/// Handler for the username existence check.
pub struct ProfileExistsHandler {
    users: Arc<dyn UserRepository>,
}

impl ProfileExistsHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: ProfileExistsQuery) -> Result<bool, DomainError> {
        self.users.username_exists(&query.username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::user::test_support::{test_profile, MockUserRepository};

    #[tokio::test]
    async fn test_existing_username_reports_true() {
        let users = Arc::new(MockUserRepository::new().with_user(test_profile("u1", "taken")));
        let handler = ProfileExistsHandler::new(users);

        let exists = handler
            .handle(ProfileExistsQuery {
                username: "taken".to_string(),
            })
            .await
            .unwrap();

        assert!(exists);
    }

    #[tokio::test]
    async fn test_unknown_username_reports_false() {
        let handler = ProfileExistsHandler::new(Arc::new(MockUserRepository::new()));

        let exists = handler
            .handle(ProfileExistsQuery {
                username: "free".to_string(),
            })
            .await
            .unwrap();

        assert!(!exists);
    }
}
