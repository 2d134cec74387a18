//! Stash membership repository.

use sqlx::PgPool;
use uuid::Uuid;

use prepper_core::error::{AppError, ErrorKind};
use prepper_core::result::AppResult;
use prepper_entity::stash::{MemberProfile, MemberRole, StashMember};

/// Repository for `(stash, user)` membership rows.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    /// Create a new member repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up the membership of a user in a stash.
    pub async fn find(&self, stash_id: Uuid, user_id: Uuid) -> AppResult<Option<StashMember>> {
        sqlx::query_as::<_, StashMember>(
            "SELECT * FROM stash_members WHERE stash_id = $1 AND user_id = $2",
        )
        .bind(stash_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find membership", e))
    }

    /// List members of a stash with their profiles, oldest first.
    pub async fn list_profiles(&self, stash_id: Uuid) -> AppResult<Vec<MemberProfile>> {
        sqlx::query_as::<_, MemberProfile>(
            "SELECT m.id, m.user_id, u.name, u.email, m.role, m.joined_at \
             FROM stash_members m JOIN users u ON u.id = m.user_id \
             WHERE m.stash_id = $1 ORDER BY m.joined_at ASC",
        )
        .bind(stash_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list members", e))
    }

    /// `(stash_id, user_id)` pairs for every member of the given stashes.
    pub async fn user_ids_by_stash(&self, stash_ids: &[Uuid]) -> AppResult<Vec<(Uuid, Uuid)>> {
        sqlx::query_as::<_, (Uuid, Uuid)>(
            "SELECT stash_id, user_id FROM stash_members WHERE stash_id = ANY($1)",
        )
        .bind(stash_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list member ids", e))
    }

    /// Number of stashes a user belongs to.
    pub async fn count_for_user(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM stash_members WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count memberships", e)
            })
    }

    /// Change a member's role.
    pub async fn update_role(
        &self,
        stash_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> AppResult<StashMember> {
        sqlx::query_as::<_, StashMember>(
            "UPDATE stash_members SET role = $3 WHERE stash_id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(stash_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update role", e))
    }

    /// Remove a member from a stash.
    pub async fn delete(&self, stash_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM stash_members WHERE stash_id = $1 AND user_id = $2")
            .bind(stash_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to remove member", e))?;
        Ok(result.rows_affected() > 0)
    }
}
