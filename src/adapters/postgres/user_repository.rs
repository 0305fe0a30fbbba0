//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ImageId, UserId};
use crate::domain::user::{ProfileUpdate, UserProfile};
use crate::ports::UserRepository;

use super::rows::{row_to_user, USER_COLUMNS};
use super::{db_error, is_unique_violation};

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch user", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserProfile>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch user by username", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to check username existence", e))?;

        Ok(result.0)
    }

    async fn mark_onboarded(&self, id: &UserId) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET onboarded = TRUE WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to mark user onboarded", e))?;

        Ok(())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                username = COALESCE($3, username)
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(update.name.as_deref())
        .bind(update.username.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict("Email or username already exists")
            } else {
                db_error("Failed to update profile", e)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("User not found: {}", id)));
        }

        Ok(())
    }

    async fn set_image(&self, id: &UserId, image: &ImageId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET image = $2 WHERE id = $1")
            .bind(id.as_str())
            .bind(image.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to set profile image", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("User not found: {}", id)));
        }

        Ok(())
    }

    async fn clear_image(&self, id: &UserId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET image = NULL WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to clear profile image", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("User not found: {}", id)));
        }

        Ok(())
    }
}
