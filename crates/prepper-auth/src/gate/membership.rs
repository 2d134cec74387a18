//! Per-request membership and role checks for stash-scoped operations.
//!
//! Every check reads the membership row from the database. A caller who
//! is not a member gets the same not-found error as for a stash that does
//! not exist; a member below the required role gets a forbidden error.

use std::sync::Arc;

use uuid::Uuid;

use prepper_core::error::AppError;
use prepper_core::result::AppResult;
use prepper_database::repositories::MemberRepository;
use prepper_entity::stash::{MemberRole, StashMember};

/// Apply the role rule to an already loaded membership.
pub fn check_membership(
    membership: Option<StashMember>,
    required: MemberRole,
) -> AppResult<StashMember> {
    let member = membership.ok_or_else(|| AppError::not_found("Stash not found"))?;
    if !member.role.has_at_least(&required) {
        return Err(AppError::authorization(format!(
            "This action requires the {required} role"
        )));
    }
    Ok(member)
}

/// Resolves a caller's membership in a stash and enforces role tiers.
#[derive(Debug, Clone)]
pub struct StashGate {
    members: Arc<MemberRepository>,
}

impl StashGate {
    /// Creates a new gate.
    pub fn new(members: Arc<MemberRepository>) -> Self {
        Self { members }
    }

    /// Require that `user_id` is a member of `stash_id` with at least `required`.
    pub async fn require(
        &self,
        stash_id: Uuid,
        user_id: Uuid,
        required: MemberRole,
    ) -> AppResult<StashMember> {
        let membership = self.members.find(stash_id, user_id).await?;
        let result = check_membership(membership, required);
        if let Err(e) = &result {
            tracing::debug!(%stash_id, %user_id, %required, error = %e, "Stash access denied");
        }
        result
    }

    /// Any membership suffices.
    pub async fn require_member(&self, stash_id: Uuid, user_id: Uuid) -> AppResult<StashMember> {
        self.require(stash_id, user_id, MemberRole::Member).await
    }
}
