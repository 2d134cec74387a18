//! Stash invitation repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use prepper_core::error::{AppError, ErrorKind};
use prepper_core::result::AppResult;
use prepper_entity::stash::{
    Invitation, InvitationDetails, InvitationStatus, InvitationTarget, MemberRole,
};

use super::map_write_error;

const DETAILS_SELECT: &str = "SELECT i.id, i.stash_id, s.name AS stash_name, \
     u.name AS invited_by_name, i.status, i.created_at, i.expires_at \
     FROM stash_invitations i \
     JOIN stashes s ON s.id = i.stash_id \
     LEFT JOIN users u ON u.id = i.invited_by";

/// Repository for invitations, on both the inviting and invited side.
#[derive(Debug, Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    /// Create a new invitation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an invitation by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Invitation>> {
        sqlx::query_as::<_, Invitation>("SELECT * FROM stash_invitations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find invitation", e))
    }

    /// Find an invitation with stash and inviter names.
    pub async fn find_details(&self, id: Uuid) -> AppResult<Option<InvitationDetails>> {
        sqlx::query_as::<_, InvitationDetails>(&format!("{DETAILS_SELECT} WHERE i.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find invitation details", e)
            })
    }

    /// Pending invitations of a stash, newest first.
    pub async fn list_pending_for_stash(&self, stash_id: Uuid) -> AppResult<Vec<Invitation>> {
        sqlx::query_as::<_, Invitation>(
            "SELECT * FROM stash_invitations WHERE stash_id = $1 AND status = $2 \
             ORDER BY created_at DESC",
        )
        .bind(stash_id)
        .bind(InvitationStatus::Pending)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list invitations", e))
    }

    /// Pending, unexpired invitations addressed to a user or their address.
    pub async fn list_for_invitee(
        &self,
        user_id: Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<InvitationDetails>> {
        sqlx::query_as::<_, InvitationDetails>(&format!(
            "{DETAILS_SELECT} WHERE (i.user_id = $1 OR LOWER(i.email) = LOWER($2)) \
             AND i.status = $3 AND i.expires_at > $4 ORDER BY i.created_at DESC"
        ))
        .bind(user_id)
        .bind(email)
        .bind(InvitationStatus::Pending)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list user invitations", e)
        })
    }

    /// A PENDING invitation of the stash for the same address or account.
    pub async fn find_pending_for_target(
        &self,
        stash_id: Uuid,
        target: &InvitationTarget,
    ) -> AppResult<Option<Invitation>> {
        sqlx::query_as::<_, Invitation>(
            "SELECT * FROM stash_invitations WHERE stash_id = $1 AND status = $2 \
             AND ((email IS NOT NULL AND email = $3) OR (user_id IS NOT NULL AND user_id = $4)) \
             LIMIT 1",
        )
        .bind(stash_id)
        .bind(InvitationStatus::Pending)
        .bind(&target.email)
        .bind(target.user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check pending invitation", e)
        })
    }

    /// Insert a PENDING invitation.
    pub async fn create(
        &self,
        stash_id: Uuid,
        target: &InvitationTarget,
        invited_by: Uuid,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Invitation> {
        sqlx::query_as::<_, Invitation>(
            "INSERT INTO stash_invitations (id, stash_id, email, user_id, invited_by, status, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(stash_id)
        .bind(&target.email)
        .bind(target.user_id)
        .bind(invited_by)
        .bind(InvitationStatus::Pending)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_write_error(
                e,
                "Failed to create invitation",
                "An invitation is already pending for this user",
            )
        })
    }

    /// Move a pending invitation to `status`; fails once it has been answered.
    pub async fn set_status(&self, id: Uuid, status: InvitationStatus) -> AppResult<Invitation> {
        sqlx::query_as::<_, Invitation>(
            "UPDATE stash_invitations SET status = $2 WHERE id = $1 AND status = $3 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(InvitationStatus::Pending)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update invitation", e)
        })?
        .ok_or_else(no_longer_pending)
    }

    /// Accept an invitation: add a MEMBER row for the user (unless one
    /// exists) and mark the invitation ACCEPTED, atomically.
    pub async fn accept(&self, invitation: &Invitation, user_id: Uuid) -> AppResult<Invitation> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let accepted = sqlx::query_as::<_, Invitation>(
            "UPDATE stash_invitations SET status = $2, user_id = COALESCE(user_id, $3) \
             WHERE id = $1 AND status = $4 RETURNING *",
        )
        .bind(invitation.id)
        .bind(InvitationStatus::Accepted)
        .bind(user_id)
        .bind(InvitationStatus::Pending)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to accept invitation", e)
        })?
        .ok_or_else(no_longer_pending)?;

        sqlx::query(
            "INSERT INTO stash_members (id, stash_id, user_id, role) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (stash_id, user_id) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(invitation.stash_id)
        .bind(user_id)
        .bind(MemberRole::Member)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add member", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(accepted)
    }

    /// Delete an invitation of the given stash.
    pub async fn delete(&self, stash_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM stash_invitations WHERE id = $1 AND stash_id = $2")
            .bind(id)
            .bind(stash_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete invitation", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}

/// A concurrent answer already moved the invitation out of PENDING.
fn no_longer_pending() -> AppError {
    AppError::validation("Invitation is no longer pending")
}
