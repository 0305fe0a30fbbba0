//! Shared row-to-domain mapping for the postgres adapters.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, ImageId, PostId, Timestamp, UserId,
};
use crate::domain::post::{Post, PostCategory};
use crate::domain::user::{PostCounts, UserProfile};

/// The users-table columns in the order the mappers expect.
pub(super) const USER_COLUMNS: &str = "id, name, username, email, email_verified, image, \
     onboarded, outfit_post_count, hoodie_post_count, shirt_post_count, \
     pants_post_count, shoes_post_count, watch_post_count, image_count, like_count";

/// `USER_COLUMNS` qualified with a table alias, for joined queries.
pub(super) fn prefixed_user_columns(alias: &str) -> String {
    USER_COLUMNS
        .split(", ")
        .map(|c| format!("{}.{}", alias, c.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reads one column, mapping decode failures to a database error.
pub(super) fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to read column {}: {}", column, e),
        )
    })
}

pub(super) fn row_to_user(row: &PgRow) -> Result<UserProfile, DomainError> {
    let id: String = get(row, "id")?;
    let name: Option<String> = get(row, "name")?;
    let username: String = get(row, "username")?;
    let email: String = get(row, "email")?;
    let email_verified: Option<DateTime<Utc>> = get(row, "email_verified")?;
    let image: Option<String> = get(row, "image")?;
    let onboarded: bool = get(row, "onboarded")?;

    let counts = PostCounts {
        outfit: get(row, "outfit_post_count")?,
        hoodie: get(row, "hoodie_post_count")?,
        shirt: get(row, "shirt_post_count")?,
        pants: get(row, "pants_post_count")?,
        shoes: get(row, "shoes_post_count")?,
        watch: get(row, "watch_post_count")?,
        images: get(row, "image_count")?,
        likes: get(row, "like_count")?,
    };

    Ok(UserProfile {
        id: UserId::new(id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e))
        })?,
        name,
        username,
        email,
        email_verified: email_verified.map(Timestamp::from_datetime),
        image: image
            .map(ImageId::new)
            .transpose()
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid image id: {}", e))
            })?,
        onboarded,
        counts,
    })
}

pub(super) fn row_to_post(row: &PgRow) -> Result<Post, DomainError> {
    let id: Uuid = get(row, "id")?;
    let user_id: String = get(row, "user_id")?;
    let category: String = get(row, "category")?;
    let image: String = get(row, "image")?;
    let created_at: DateTime<Utc> = get(row, "created_at")?;
    let updated_at: DateTime<Utc> = get(row, "updated_at")?;

    Ok(Post {
        id: PostId::from_uuid(id),
        user_id: UserId::new(user_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e))
        })?,
        category: category.parse::<PostCategory>().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid category: {}", e))
        })?,
        image: ImageId::new(image).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid image id: {}", e))
        })?,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}
