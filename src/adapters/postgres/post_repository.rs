//! PostgreSQL implementation of PostRepository.
//!
//! Post writes and the owner's counter adjustments share one transaction,
//! so the denormalized counts cannot drift from the actual rows.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::foundation::{DomainError, ErrorCode, PostId, UserId};
use crate::domain::post::{Post, PostCategory};
use crate::ports::PostRepository;

use super::db_error;
use super::rows::row_to_post;

const POST_COLUMNS: &str = "id, user_id, category, image, created_at, updated_at";

/// PostgreSQL implementation of PostRepository.
#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    /// Creates a new PostgresPostRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Adjusts one per-category counter and the image counter by `delta`.
///
/// The column name comes from the closed `PostCategory` mapping, never from
/// request input.
async fn adjust_counts(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &UserId,
    category: PostCategory,
    delta: i32,
) -> Result<(), DomainError> {
    let column = category.count_column();
    let sql = format!(
        "UPDATE users SET {col} = {col} + $2, image_count = image_count + $2 WHERE id = $1",
        col = column
    );

    let result = sqlx::query(&sql)
        .bind(user_id.as_str())
        .bind(delta)
        .execute(&mut **tx)
        .await
        .map_err(|e| db_error("Failed to adjust post counters", e))?;

    if result.rows_affected() == 0 {
        return Err(DomainError::not_found(format!(
            "User not found: {}",
            user_id
        )));
    }

    Ok(())
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: &Post) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let result = sqlx::query(
            r#"
            INSERT INTO posts (id, user_id, category, image, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(post.user_id.as_str())
        .bind(post.category.as_str())
        .bind(post.image.as_str())
        .bind(post.created_at.as_datetime())
        .bind(post.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to insert post", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Failed to create post",
            ));
        }

        adjust_counts(&mut tx, &post.user_id, post.category, 1).await?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit post creation", e))?;

        Ok(())
    }

    async fn find_owned(
        &self,
        id: &PostId,
        owner: &UserId,
    ) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM posts WHERE id = $1 AND user_id = $2",
            POST_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch post", e))?;

        row.as_ref().map(row_to_post).transpose()
    }

    async fn delete(&self, post: &Post) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
            .bind(post.id.as_uuid())
            .bind(post.user_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete post", e))?;

        // The post vanished between lookup and delete; counters stay put.
        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Post not found: {}",
                post.id
            )));
        }

        adjust_counts(&mut tx, &post.user_id, post.category, -1).await?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit post deletion", e))?;

        Ok(())
    }

    async fn list_recent(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM posts WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
            POST_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list posts", e))?;

        rows.iter().map(row_to_post).collect()
    }
}
