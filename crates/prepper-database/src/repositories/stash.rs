//! Stash repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use prepper_core::error::{AppError, ErrorKind};
use prepper_core::result::AppResult;
use prepper_entity::stash::{MemberRole, Stash, StashSummary};

/// Repository for stashes and their aggregate counts.
#[derive(Debug, Clone)]
pub struct StashRepository {
    pool: PgPool,
}

impl StashRepository {
    /// Create a new stash repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a stash by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Stash>> {
        sqlx::query_as::<_, Stash>("SELECT * FROM stashes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find stash", e))
    }

    /// List the stashes a user belongs to, with their role and member count.
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<StashSummary>> {
        sqlx::query_as::<_, StashSummary>(
            "SELECT s.id, s.name, m.role, s.created_at, \
             (SELECT COUNT(*) FROM stash_members c WHERE c.stash_id = s.id) AS member_count \
             FROM stash_members m JOIN stashes s ON s.id = m.stash_id \
             WHERE m.user_id = $1 ORDER BY m.joined_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list stashes", e))
    }

    /// Create a stash with `owner_id` as its single OWNER.
    pub async fn create_with_owner(&self, name: &str, owner_id: Uuid) -> AppResult<Stash> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let stash = sqlx::query_as::<_, Stash>(
            "INSERT INTO stashes (id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create stash", e))?;

        sqlx::query("INSERT INTO stash_members (id, stash_id, user_id, role) VALUES ($1, $2, $3, $4)")
            .bind(Uuid::new_v4())
            .bind(stash.id)
            .bind(owner_id)
            .bind(MemberRole::Owner)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add owner", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(stash)
    }

    /// Rename a stash.
    pub async fn rename(&self, id: Uuid, name: &str) -> AppResult<Stash> {
        sqlx::query_as::<_, Stash>(
            "UPDATE stashes SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename stash", e))
    }

    /// Delete a stash; members, invitations, items and checklist cascade.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM stashes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete stash", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of items in a stash.
    pub async fn count_items(&self, id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE stash_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count items", e))
    }

    /// Number of checklist entries in a stash.
    pub async fn count_checklist(&self, id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM checklist_items WHERE stash_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count checklist items", e)
            })
    }
}
