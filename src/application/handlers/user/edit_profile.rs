//! EditProfile - Command handler for name/username changes.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{validate_username, ProfileUpdate};
use crate::ports::UserRepository;

/// Command to change the caller's display name and/or username.
#[derive(Debug, Clone)]
pub struct EditProfileCommand {
    pub user_id: UserId,
    pub update: ProfileUpdate,
}

/// Result of a profile edit: the username the client should route by.
#[derive(Debug, Clone)]
pub struct EditProfileResult {
    pub username: String,
}

/// Handler for profile edits.
pub struct EditProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl EditProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: EditProfileCommand) -> Result<EditProfileResult, DomainError> {
        // 1. Reject reserved and malformed usernames before touching storage
        if let Some(username) = &cmd.update.username {
            validate_username(username)?;
        }

        // 2. Apply the partial update; the repository surfaces a uniqueness
        //    violation as Conflict
        self.users.update_profile(&cmd.user_id, &cmd.update).await?;

        // 3. The client routes to the profile page by username, so hand it
        //    back even when unchanged
        let username = match cmd.update.username {
            Some(username) => username,
            None => self
                .users
                .find_by_id(&cmd.user_id)
                .await?
                .ok_or_else(|| DomainError::not_found("User not found"))?
                .username,
        };

        Ok(EditProfileResult { username })
    }
}
