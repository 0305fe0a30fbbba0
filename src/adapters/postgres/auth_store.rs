//! PostgreSQL implementation of the AuthStore port.
//!
//! Satisfies the authentication library's adapter contract with plain
//! relational reads and writes. Lookups return `Ok(None)` for absence;
//! multi-statement operations run inside a transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::auth::{Account, AccountKey, NewUser, Session, UserPatch, VerificationToken};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::UserProfile;
use crate::ports::AuthStore;

use super::rows::{get, prefixed_user_columns, row_to_user, USER_COLUMNS};
use super::{db_error, is_unique_violation};

/// PostgreSQL implementation of AuthStore.
#[derive(Clone)]
pub struct PostgresAuthStore {
    pool: PgPool,
}

impl PostgresAuthStore {
    /// Creates a new PostgresAuthStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_user(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
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

    async fn fetch_session(
        &self,
        session_token: &str,
    ) -> Result<Option<Session>, DomainError> {
        let row = sqlx::query(
            "SELECT session_token, user_id, expires FROM sessions WHERE session_token = $1",
        )
        .bind(session_token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch session", e))?;

        row.as_ref().map(row_to_session).transpose()
    }
}

#[async_trait]
impl AuthStore for PostgresAuthStore {
    async fn create_user(&self, profile: NewUser) -> Result<UserProfile, DomainError> {
        let id = UserId::generate();

        sqlx::query(
            r#"
            INSERT INTO users (id, name, username, email, email_verified, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id.as_str())
        .bind(profile.name.as_deref())
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(profile.email_verified.map(|t| *t.as_datetime()))
        .bind(profile.image.as_ref().map(|i| i.as_str()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict("Email or username already exists")
            } else {
                db_error("Failed to insert user", e)
            }
        })?;

        self.fetch_user(&id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::InternalError, "User vanished after insert")
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        self.fetch_user(id).await
    }

    async fn get_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserProfile>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch user by email", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn get_user_by_account(
        &self,
        key: &AccountKey,
    ) -> Result<Option<UserProfile>, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM accounts a
            LEFT JOIN users u ON u.id = a.user_id
            WHERE a.provider = $1 AND a.provider_account_id = $2
            "#,
            prefixed_user_columns("u")
        ))
        .bind(&key.provider)
        .bind(&key.provider_account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch user by account", e))?;

        // The account row may exist with no joined user; the left join then
        // yields all-NULL user columns.
        match row {
            Some(row) => {
                let id: Option<String> = get(&row, "id")?;
                if id.is_none() {
                    return Ok(None);
                }
                Ok(Some(row_to_user(&row)?))
            }
            None => Ok(None),
        }
    }

    async fn update_user(&self, patch: UserPatch) -> Result<UserProfile, DomainError> {
        // COALESCE keeps absent patch fields at their stored value; see the
        // UserPatch docs for the no-clear contract.
        sqlx::query(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                email_verified = COALESCE($4, email_verified),
                image = COALESCE($5, image)
            WHERE id = $1
            "#,
        )
        .bind(patch.id.as_str())
        .bind(patch.name.as_deref())
        .bind(patch.email.as_deref())
        .bind(patch.email_verified.map(|t| *t.as_datetime()))
        .bind(patch.image.as_ref().map(|i| i.as_str()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict("Email or username already exists")
            } else {
                db_error("Failed to update user", e)
            }
        })?;

        self.fetch_user(&patch.id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User not found: {}", patch.id)))
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete sessions", e))?;

        sqlx::query("DELETE FROM accounts WHERE user_id = $1")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete accounts", e))?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete user", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit user deletion", e))?;

        Ok(())
    }

    async fn link_account(&self, account: Account) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                user_id, type, provider, provider_account_id,
                refresh_token, access_token, expires_at,
                token_type, scope, id_token, session_state
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(account.user_id.as_str())
        .bind(&account.kind)
        .bind(&account.provider)
        .bind(&account.provider_account_id)
        .bind(account.refresh_token.as_deref())
        .bind(account.access_token.as_deref())
        .bind(account.expires_at)
        .bind(account.token_type.as_deref())
        .bind(account.scope.as_deref())
        .bind(account.id_token.as_deref())
        .bind(account.session_state.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::conflict("Account is already linked")
            } else {
                db_error("Failed to link account", e)
            }
        })?;

        Ok(())
    }

    async fn unlink_account(&self, key: &AccountKey) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM accounts WHERE provider = $1 AND provider_account_id = $2")
            .bind(&key.provider)
            .bind(&key.provider_account_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to unlink account", e))?;

        Ok(())
    }

    async fn create_session(&self, session: Session) -> Result<Session, DomainError> {
        sqlx::query(
            "INSERT INTO sessions (session_token, user_id, expires) VALUES ($1, $2, $3)",
        )
        .bind(&session.session_token)
        .bind(session.user_id.as_str())
        .bind(session.expires.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert session", e))?;

        self.fetch_session(&session.session_token)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::InternalError, "Session vanished after insert")
            })
    }

    async fn get_session_and_user(
        &self,
        session_token: &str,
    ) -> Result<Option<(Session, UserProfile)>, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            SELECT s.session_token, s.user_id, s.expires, {}
            FROM sessions s
            INNER JOIN users u ON u.id = s.user_id
            WHERE s.session_token = $1
            "#,
            prefixed_user_columns("u")
        ))
        .bind(session_token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch session and user", e))?;

        match row {
            Some(row) => {
                let session = row_to_session(&row)?;
                let user = row_to_user(&row)?;
                Ok(Some((session, user)))
            }
            None => Ok(None),
        }
    }

    async fn update_session(
        &self,
        session: Session,
    ) -> Result<Option<Session>, DomainError> {
        sqlx::query(
            "UPDATE sessions SET user_id = $2, expires = $3 WHERE session_token = $1",
        )
        .bind(&session.session_token)
        .bind(session.user_id.as_str())
        .bind(session.expires.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update session", e))?;

        self.fetch_session(&session.session_token).await
    }

    async fn delete_session(&self, session_token: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM sessions WHERE session_token = $1")
            .bind(session_token)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete session", e))?;

        Ok(())
    }

    async fn create_verification_token(
        &self,
        token: VerificationToken,
    ) -> Result<VerificationToken, DomainError> {
        sqlx::query(
            "INSERT INTO verification_tokens (identifier, token, expires) VALUES ($1, $2, $3)",
        )
        .bind(&token.identifier)
        .bind(&token.token)
        .bind(token.expires.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to insert verification token", e))?;

        let row = sqlx::query(
            r#"
            SELECT identifier, token, expires
            FROM verification_tokens
            WHERE identifier = $1 AND token = $2
            "#,
        )
        .bind(&token.identifier)
        .bind(&token.token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch verification token", e))?;

        row.as_ref().map(row_to_verification_token).transpose()?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::InternalError,
                "Verification token vanished after insert",
            )
        })
    }

    async fn use_verification_token(
        &self,
        identifier: &str,
        token: &str,
    ) -> Result<Option<VerificationToken>, DomainError> {
        // Single conditional delete: of two concurrent consumers, exactly
        // one gets the row back.
        let row = sqlx::query(
            r#"
            DELETE FROM verification_tokens
            WHERE identifier = $1 AND token = $2
            RETURNING identifier, token, expires
            "#,
        )
        .bind(identifier)
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to consume verification token", e))?;

        row.as_ref().map(row_to_verification_token).transpose()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_session(row: &PgRow) -> Result<Session, DomainError> {
    let session_token: String = get(row, "session_token")?;
    let user_id: String = get(row, "user_id")?;
    let expires: DateTime<Utc> = get(row, "expires")?;

    Ok(Session {
        session_token,
        user_id: UserId::new(user_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid user id: {}", e))
        })?,
        expires: Timestamp::from_datetime(expires),
    })
}

fn row_to_verification_token(row: &PgRow) -> Result<VerificationToken, DomainError> {
    let identifier: String = get(row, "identifier")?;
    let token: String = get(row, "token")?;
    let expires: DateTime<Utc> = get(row, "expires")?;

    Ok(VerificationToken {
        identifier,
        token,
        expires: Timestamp::from_datetime(expires),
    })
}
