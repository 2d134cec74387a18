//! Push subscription repository.

use sqlx::PgPool;
use uuid::Uuid;

use prepper_core::error::{AppError, ErrorKind};
use prepper_core::result::AppResult;
use prepper_entity::push::PushSubscription;

/// Repository for browser push endpoints.
#[derive(Debug, Clone)]
pub struct PushSubscriptionRepository {
    pool: PgPool,
}

impl PushSubscriptionRepository {
    /// Create a new push subscription repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register an endpoint for a user, replacing keys and owner if the
    /// endpoint is already known.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        endpoint: &str,
        p256dh: &str,
        auth: &str,
    ) -> AppResult<PushSubscription> {
        sqlx::query_as::<_, PushSubscription>(
            "INSERT INTO push_subscriptions (id, user_id, endpoint, p256dh, auth) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (endpoint) DO UPDATE SET user_id = EXCLUDED.user_id, \
             p256dh = EXCLUDED.p256dh, auth = EXCLUDED.auth \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(endpoint)
        .bind(p256dh)
        .bind(auth)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to save push subscription", e)
        })
    }

    /// Subscriptions of one user.
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<PushSubscription>> {
        sqlx::query_as::<_, PushSubscription>(
            "SELECT * FROM push_subscriptions WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list push subscriptions", e)
        })
    }

    /// Subscriptions of several users.
    pub async fn find_by_users(&self, user_ids: &[Uuid]) -> AppResult<Vec<PushSubscription>> {
        sqlx::query_as::<_, PushSubscription>(
            "SELECT * FROM push_subscriptions WHERE user_id = ANY($1) ORDER BY created_at ASC",
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list push subscriptions", e)
        })
    }

    /// Remove a user's subscription by endpoint.
    pub async fn delete_by_endpoint(&self, user_id: Uuid, endpoint: &str) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM push_subscriptions WHERE user_id = $1 AND endpoint = $2")
                .bind(user_id)
                .bind(endpoint)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to delete subscription", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a subscription by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM push_subscriptions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete subscription", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
