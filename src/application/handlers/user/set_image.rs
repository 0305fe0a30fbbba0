//! SetImage - Command handler for replacing the profile image.

use std::sync::Arc;

use tracing::error;

use crate::application::cleanup::ImageCleanup;
use crate::domain::foundation::{AuthenticatedUser, DomainError, ImageId, Timestamp};
use crate::domain::post::ImageKey;
use crate::ports::{ImageStore, UserRepository};

/// Command to replace the caller's profile image.
#[derive(Debug, Clone)]
pub struct SetImageCommand {
    pub user: AuthenticatedUser,
}

/// Result of a profile image replacement.
#[derive(Debug, Clone)]
pub struct SetImageResult {
    pub image: ImageId,
    pub upload_url: String,
}

/// Handler for profile image replacement.
pub struct SetImageHandler {
    users: Arc<dyn UserRepository>,
    images: Arc<dyn ImageStore>,
    cleanup: ImageCleanup,
}

impl SetImageHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        images: Arc<dyn ImageStore>,
        cleanup: ImageCleanup,
    ) -> Self {
        Self {
            users,
            images,
            cleanup,
        }
    }

    pub async fn handle(&self, cmd: SetImageCommand) -> Result<SetImageResult, DomainError> {
        // 1. Mint a fresh image id and sign its upload URL
        let image = ImageId::derive(&cmd.user.id, Timestamp::now().epoch_millis());
        let key = ImageKey::new(&cmd.user.id, &image);

        let upload_url = match self.images.signed_upload_url(&key).await {
            Ok(url) => url,
            Err(e) => {
                error!(key = key.as_str(), error = %e, "Failed to sign upload URL");
                return Err(DomainError::validation("image", "Invalid image"));
            }
        };

        // 2. The previous image object goes away in the background
        if let Some(old) = &cmd.user.image {
            self.cleanup.schedule(ImageKey::new(&cmd.user.id, old));
        }

        // 3. Point the profile at the new image id
        self.users.set_image(&cmd.user.id, &image).await?;

        Ok(SetImageResult { image, upload_url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::s3::InMemoryImageStore;
    use crate::application::handlers::user::test_support::{test_profile, MockUserRepository};
    use crate::domain::foundation::UserId;

    fn caller(id: &str, image: Option<ImageId>) -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(id.to_string()).unwrap(),
            email: format!("{}@example.com", id),
            display_name: None,
            image,
        }
    }

    fn handler_with(
        users: Arc<MockUserRepository>,
        store: &InMemoryImageStore,
    ) -> SetImageHandler {
        SetImageHandler::new(
            users,
            Arc::new(store.clone()),
            ImageCleanup::new(Arc::new(store.clone())),
        )
    }

    #[tokio::test]
    async fn test_set_image_signs_url_and_updates_profile() {
        let users = Arc::new(MockUserRepository::new().with_user(test_profile("u1", "alice")));
        let store = InMemoryImageStore::new();
        let handler = handler_with(users.clone(), &store);

        let result = handler
            .handle(SetImageCommand {
                user: caller("u1", None),
            })
            .await
            .unwrap();

        assert!(result.upload_url.contains(result.image.as_str()));
        assert_eq!(
            users.stored(&UserId::new("u1".to_string()).unwrap()).unwrap().image,
            Some(result.image)
        );
    }

    #[tokio::test]
    async fn test_set_image_schedules_old_key_deletion() {
        let users = Arc::new(MockUserRepository::new().with_user(test_profile("u1", "alice")));
        let store = InMemoryImageStore::new();
        let handler = handler_with(users, &store);

        let old_user = UserId::new("u1".to_string()).unwrap();
        let old_image = ImageId::derive(&old_user, 1_600_000_000_000);
        let old_key = ImageKey::new(&old_user, &old_image);

        handler
            .handle(SetImageCommand {
                user: caller("u1", Some(old_image)),
            })
            .await
            .unwrap();

        for _ in 0..100 {
            if !store.deleted_keys().await.is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert_eq!(
            store.deleted_keys().await,
            vec![old_key.as_str().to_string()]
        );
    }

    #[tokio::test]
    async fn test_set_image_without_previous_deletes_nothing() {
        let users = Arc::new(MockUserRepository::new().with_user(test_profile("u1", "alice")));
        let store = InMemoryImageStore::new();
        let handler = handler_with(users, &store);

        handler
            .handle(SetImageCommand {
                user: caller("u1", None),
            })
            .await
            .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(store.deleted_keys().await.is_empty());
    }
}
