//! GetMe - Query handler for the caller's own profile.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ImageId, UserId};
use crate::ports::UserRepository;

/// Query for the calling user's own profile.
#[derive(Debug, Clone)]
pub struct GetMeQuery {
    pub user_id: UserId,
}

/// The caller's own profile view.
#[derive(Debug, Clone)]
pub struct Me {
    pub id: UserId,
    pub username: String,
    pub name: Option<String>,
    pub image: Option<ImageId>,
    pub onboarded: bool,
}

/// Handler for the caller's profile.
///
/// Fetching your own profile doubles as the onboarding acknowledgement:
/// the first call flips the onboarded flag, later calls are no-ops.
pub struct GetMeHandler {
    users: Arc<dyn UserRepository>,
}

impl GetMeHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetMeQuery) -> Result<Me, DomainError> {
        let profile = self
            .users
            .find_by_id(&query.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))?;

        // The response carries the flag as it was read, so the first call
        // reports onboarded=false exactly once; the client keys its one-time
        // onboarding step off that value.
        if !profile.onboarded {
            self.users.mark_onboarded(&query.user_id).await?;
        }

        Ok(Me {
            id: profile.id,
            username: profile.username,
            name: profile.name,
            image: profile.image,
            onboarded: profile.onboarded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::user::test_support::{test_profile, MockUserRepository};
    use crate::domain::foundation::ErrorCode;

    fn user(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_get_me_returns_profile_fields() {
        let users = Arc::new(MockUserRepository::new().with_user(test_profile("u1", "alice")));
        let handler = GetMeHandler::new(users);

        let me = handler.handle(GetMeQuery { user_id: user("u1") }).await.unwrap();

        assert_eq!(me.id, user("u1"));
        assert_eq!(me.username, "alice");
    }

    #[tokio::test]
    async fn test_first_call_reports_unonboarded_and_sets_flag() {
        let users = Arc::new(MockUserRepository::new().with_user(test_profile("u1", "alice")));
        let handler = GetMeHandler::new(users.clone());

        assert!(!users.stored(&user("u1")).unwrap().onboarded);

        let me = handler.handle(GetMeQuery { user_id: user("u1") }).await.unwrap();

        // The pre-update value goes out exactly once
        assert!(!me.onboarded);
        assert!(users.stored(&user("u1")).unwrap().onboarded);
    }

    #[tokio::test]
    async fn test_repeat_calls_report_onboarded() {
        let users = Arc::new(MockUserRepository::new().with_user(test_profile("u1", "alice")));
        let handler = GetMeHandler::new(users.clone());

        let first = handler.handle(GetMeQuery { user_id: user("u1") }).await.unwrap();
        let second = handler.handle(GetMeQuery { user_id: user("u1") }).await.unwrap();

        assert!(!first.onboarded);
        assert!(second.onboarded);
        assert!(users.stored(&user("u1")).unwrap().onboarded);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let handler = GetMeHandler::new(Arc::new(MockUserRepository::new()));

        let result = handler.handle(GetMeQuery { user_id: user("ghost") }).await;

        assert_eq!(result.unwrap_err().code, ErrorCode::NotFound);
    }
}
