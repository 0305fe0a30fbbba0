//! DeleteImage - Command handler for removing the profile image.

use std::sync::Arc;

use crate::application::cleanup::ImageCleanup;
use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::domain::post::ImageKey;
use crate::ports::UserRepository;

/// Command to remove the caller's profile image.
#[derive(Debug, Clone)]
pub struct DeleteImageCommand {
    pub user: AuthenticatedUser,
}

/// Handler for profile image removal.
pub struct DeleteImageHandler {
    users: Arc<dyn UserRepository>,
    cleanup: ImageCleanup,
}

impl DeleteImageHandler {
    pub fn new(users: Arc<dyn UserRepository>, cleanup: ImageCleanup) -> Self {
        Self { users, cleanup }
    }

    pub async fn handle(&self, cmd: DeleteImageCommand) -> Result<(), DomainError> {
        if let Some(image) = &cmd.user.image {
            self.cleanup.schedule(ImageKey::new(&cmd.user.id, image));
        }

        self.users.clear_image(&cmd.user.id).await
    }
}
