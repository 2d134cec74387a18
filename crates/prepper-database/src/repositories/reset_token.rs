//! Password reset token repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use prepper_core::error::{AppError, ErrorKind};
use prepper_core::result::AppResult;
use prepper_entity::user::PasswordResetToken;

/// Repository for single-use password reset tokens.
#[derive(Debug, Clone)]
pub struct ResetTokenRepository {
    pool: PgPool,
}

impl ResetTokenRepository {
    /// Create a new reset token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Replace any outstanding tokens of the user with a new one.
    pub async fn replace_for_user(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<PasswordResetToken> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM password_reset_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete reset tokens", e)
            })?;

        let created = sqlx::query_as::<_, PasswordResetToken>(
            "INSERT INTO password_reset_tokens (id, token, user_id, expires_at) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create reset token", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(created)
    }

    /// Remove and return a token in one statement, so it can be used once.
    pub async fn take(&self, token: &str) -> AppResult<Option<PasswordResetToken>> {
        sqlx::query_as::<_, PasswordResetToken>(
            "DELETE FROM password_reset_tokens WHERE token = $1 RETURNING *",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to consume reset token", e))
    }
}
