//! User and profile command and query handlers.

mod delete_image;
mod edit_profile;
mod get_me;
mod get_profile;
mod profile_exists;
mod set_image;

pub use delete_image::{DeleteImageCommand, DeleteImageHandler};
pub use edit_profile::{EditProfileCommand, EditProfileHandler, EditProfileResult};
pub use get_me::{GetMeHandler, GetMeQuery, Me};
pub use get_profile::{GetProfileHandler, GetProfileQuery};
pub use profile_exists::{ProfileExistsHandler, ProfileExistsQuery};
pub use set_image::{SetImageCommand, SetImageHandler, SetImageResult};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::foundation::{DomainError, ImageId, UserId};
    use crate::domain::user::{ProfileUpdate, UserProfile};
    use crate::ports::UserRepository;

    /// In-memory user repository shared by the handler tests.
    pub struct MockUserRepository {
        users: Mutex<Vec<UserProfile>>,
    }

    impl MockUserRepository {
        pub fn new() -> Self {
            Self {
                users: Mutex::new(Vec::new()),
            }
        }

        pub fn with_user(self, user: UserProfile) -> Self {
            self.users.lock().unwrap().push(user);
            self
        }

        pub fn stored(&self, id: &UserId) -> Option<UserProfile> {
            self.users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == *id)
                .cloned()
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
            Ok(self.stored(id))
        }

        async fn find_by_username(
            &self,
            username: &str,
        ) -> Result<Option<UserProfile>, DomainError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.username == username)
                .cloned())
        }

        async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .any(|u| u.username == username))
        }

        async fn mark_onboarded(&self, id: &UserId) -> Result<(), DomainError> {
            let mut users = self.users.lock().unwrap();
            if let Some(user) = users.iter_mut().find(|u| u.id == *id) {
                user.onboarded = true;
            }
            Ok(())
        }

        async fn update_profile(
            &self,
            id: &UserId,
            update: &ProfileUpdate,
        ) -> Result<(), DomainError> {
            let mut users = self.users.lock().unwrap();

            if let Some(username) = &update.username {
                let taken = users
                    .iter()
                    .any(|u| u.id != *id && u.username == *username);
                if taken {
                    return Err(DomainError::conflict("Email or username already exists"));
                }
            }

            let user = users
                .iter_mut()
                .find(|u| u.id == *id)
                .ok_or_else(|| DomainError::not_found("User not found"))?;
            if let Some(name) = &update.name {
                user.name = Some(name.clone());
            }
            if let Some(username) = &update.username {
                user.username = username.clone();
            }
            Ok(())
        }

        async fn set_image(&self, id: &UserId, image: &ImageId) -> Result<(), DomainError> {
            let mut users = self.users.lock().unwrap();
            if let Some(user) = users.iter_mut().find(|u| u.id == *id) {
                user.image = Some(image.clone());
            }
            Ok(())
        }

        async fn clear_image(&self, id: &UserId) -> Result<(), DomainError> {
            let mut users = self.users.lock().unwrap();
            if let Some(user) = users.iter_mut().find(|u| u.id == *id) {
                user.image = None;
            }
            Ok(())
        }
    }

    pub fn test_profile(id: &str, username: &str) -> UserProfile {
        use crate::domain::user::PostCounts;

        UserProfile {
            id: UserId::new(id.to_string()).unwrap(),
            name: Some(format!("User {}", id)),
            username: username.to_string(),
            email: format!("{}@example.com", id),
            email_verified: None,
            image: None,
            onboarded: false,
            counts: PostCounts::default(),
        }
    }
}
