//! Stash CRUD and member administration.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use prepper_auth::StashGate;
use prepper_core::error::AppError;
use prepper_core::traits::storage::ObjectStorage;
use prepper_database::repositories::{
    InvitationRepository, MemberRepository, PhotoRepository, StashRepository,
};
use prepper_entity::stash::{Invitation, MemberProfile, MemberRole, Stash, StashSummary};

use crate::context::RequestContext;

/// A stash as seen by one of its members.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StashDetails {
    #[serde(flatten)]
    pub stash: Stash,
    /// The caller's role.
    pub role: MemberRole,
    pub members: Vec<MemberProfile>,
    /// Pending invitations, only for owners and admins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitations: Option<Vec<Invitation>>,
    pub item_count: i64,
    pub checklist_count: i64,
}

/// Handles stash lifecycle and membership changes.
#[derive(Debug, Clone)]
pub struct StashService {
    stashes: Arc<StashRepository>,
    members: Arc<MemberRepository>,
    invitations: Arc<InvitationRepository>,
    photos: Arc<PhotoRepository>,
    gate: Arc<StashGate>,
    storage: Arc<dyn ObjectStorage>,
}

impl StashService {
    /// Creates a new stash service.
    pub fn new(
        stashes: Arc<StashRepository>,
        members: Arc<MemberRepository>,
        invitations: Arc<InvitationRepository>,
        photos: Arc<PhotoRepository>,
        gate: Arc<StashGate>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            stashes,
            members,
            invitations,
            photos,
            gate,
            storage,
        }
    }

    /// Stashes the caller belongs to.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<StashSummary>, AppError> {
        self.stashes.list_for_user(ctx.user_id).await
    }

    /// Create a stash owned by the caller.
    pub async fn create(&self, ctx: &RequestContext, name: &str) -> Result<Stash, AppError> {
        let name = validate_name(name)?;
        let stash = self.stashes.create_with_owner(name, ctx.user_id).await?;
        info!(user_id = %ctx.user_id, stash_id = %stash.id, "Stash created");
        Ok(stash)
    }

    /// Full view of one stash.
    pub async fn get(&self, ctx: &RequestContext, stash_id: Uuid) -> Result<StashDetails, AppError> {
        let membership = self.gate.require_member(stash_id, ctx.user_id).await?;
        let stash = self
            .stashes
            .find_by_id(stash_id)
            .await?
            .ok_or_else(|| AppError::not_found("Stash not found"))?;

        let members = self.members.list_profiles(stash_id).await?;
        let invitations = if membership.role.can_manage_members() {
            Some(self.invitations.list_pending_for_stash(stash_id).await?)
        } else {
            None
        };
        let item_count = self.stashes.count_items(stash_id).await?;
        let checklist_count = self.stashes.count_checklist(stash_id).await?;

        Ok(StashDetails {
            stash,
            role: membership.role,
            members,
            invitations,
            item_count,
            checklist_count,
        })
    }

    /// Rename a stash. Owners and admins only.
    pub async fn rename(
        &self,
        ctx: &RequestContext,
        stash_id: Uuid,
        name: &str,
    ) -> Result<Stash, AppError> {
        self.gate
            .require(stash_id, ctx.user_id, MemberRole::Admin)
            .await?;
        let name = validate_name(name)?;
        let stash = self.stashes.rename(stash_id, name).await?;
        info!(user_id = %ctx.user_id, %stash_id, "Stash renamed");
        Ok(stash)
    }

    /// Delete a stash with its items, photos and checklist. Owner only.
    ///
    /// Photo objects are removed after the rows; failures there are logged.
    pub async fn delete(&self, ctx: &RequestContext, stash_id: Uuid) -> Result<(), AppError> {
        self.gate
            .require(stash_id, ctx.user_id, MemberRole::Owner)
            .await?;

        if self.members.count_for_user(ctx.user_id).await? <= 1 {
            return Err(AppError::validation("Cannot delete your only stash"));
        }

        let keys = self.photos.keys_for_stash(stash_id).await?;
        self.stashes.delete(stash_id).await?;

        for key in &keys {
            if let Err(e) = self.storage.delete(key).await {
                warn!(%stash_id, key = %key, error = %e, "Failed to delete photo object");
            }
        }

        info!(user_id = %ctx.user_id, %stash_id, photos = keys.len(), "Stash deleted");
        Ok(())
    }

    /// Members of a stash with their profiles.
    pub async fn members(
        &self,
        ctx: &RequestContext,
        stash_id: Uuid,
    ) -> Result<Vec<MemberProfile>, AppError> {
        self.gate.require_member(stash_id, ctx.user_id).await?;
        self.members.list_profiles(stash_id).await
    }

    /// Remove a member, or leave when `user_id` is the caller.
    pub async fn remove_member(
        &self,
        ctx: &RequestContext,
        stash_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), AppError> {
        let caller = self.gate.require_member(stash_id, ctx.user_id).await?;

        if user_id == ctx.user_id {
            if caller.role == MemberRole::Owner {
                return Err(AppError::validation("The owner cannot leave the stash"));
            }
            if self.members.count_for_user(ctx.user_id).await? <= 1 {
                return Err(AppError::validation("Cannot leave your only stash"));
            }
            self.members.delete(stash_id, user_id).await?;
            info!(user_id = %ctx.user_id, %stash_id, "Left stash");
            return Ok(());
        }

        if !caller.role.can_manage_members() {
            return Err(AppError::authorization(
                "Only owners and admins can remove members",
            ));
        }

        let target = self
            .members
            .find(stash_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Member not found"))?;

        if !caller.role.can_remove(&target.role) {
            return Err(AppError::authorization(format!(
                "A {} cannot remove a {}",
                caller.role, target.role
            )));
        }

        self.members.delete(stash_id, user_id).await?;
        info!(
            user_id = %ctx.user_id,
            %stash_id,
            removed = %user_id,
            "Member removed"
        );
        Ok(())
    }

    /// Change another member's role. Owner only; ownership cannot be granted.
    pub async fn change_role(
        &self,
        ctx: &RequestContext,
        stash_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<MemberProfile, AppError> {
        self.gate
            .require(stash_id, ctx.user_id, MemberRole::Owner)
            .await?;

        if user_id == ctx.user_id {
            return Err(AppError::validation("You cannot change your own role"));
        }
        if role == MemberRole::Owner {
            return Err(AppError::validation("Role must be ADMIN or MEMBER"));
        }

        if self.members.find(stash_id, user_id).await?.is_none() {
            return Err(AppError::not_found("Member not found"));
        }
        self.members.update_role(stash_id, user_id, role).await?;

        info!(
            user_id = %ctx.user_id,
            %stash_id,
            member = %user_id,
            %role,
            "Member role changed"
        );

        self.members
            .list_profiles(stash_id)
            .await?
            .into_iter()
            .find(|m| m.user_id == user_id)
            .ok_or_else(|| AppError::not_found("Member not found"))
    }
}

/// Trim a stash name and reject blank ones.
pub fn validate_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Stash name is required"));
    }
    Ok(name)
}
