//! Stash invitations, from both the inviter's and the invitee's side.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use prepper_auth::StashGate;
use prepper_core::config::{AuthConfig, MailConfig};
use prepper_core::error::AppError;
use prepper_database::repositories::{
    InvitationRepository, MemberRepository, StashRepository, UserRepository,
};
use prepper_entity::stash::{
    Invitation, InvitationDetails, InvitationStatus, InvitationTarget, MemberRole,
};

use crate::auth::service::normalize_email;
use crate::context::RequestContext;
use crate::language::Language;
use crate::mail::{InvitationEmail, Mailer, OutgoingEmail};

/// Data for inviting someone to a stash.
#[derive(Debug, Clone, Default)]
pub struct InviteRequest {
    pub email: Option<String>,
    pub user_id: Option<Uuid>,
    pub language: Language,
}

/// The invitee's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationAction {
    Accept,
    Decline,
}

/// An invitation as shown to its invitee.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationView {
    #[serde(flatten)]
    pub details: InvitationDetails,
    pub is_expired: bool,
}

/// Creates, lists and answers stash invitations.
#[derive(Debug, Clone)]
pub struct InvitationService {
    invitations: Arc<InvitationRepository>,
    members: Arc<MemberRepository>,
    users: Arc<UserRepository>,
    stashes: Arc<StashRepository>,
    gate: Arc<StashGate>,
    mailer: Arc<dyn Mailer>,
    mail_from: String,
    app_url: String,
    ttl: Duration,
}

impl InvitationService {
    /// Creates a new invitation service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        invitations: Arc<InvitationRepository>,
        members: Arc<MemberRepository>,
        users: Arc<UserRepository>,
        stashes: Arc<StashRepository>,
        gate: Arc<StashGate>,
        mailer: Arc<dyn Mailer>,
        auth_config: &AuthConfig,
        mail_config: &MailConfig,
    ) -> Self {
        Self {
            invitations,
            members,
            users,
            stashes,
            gate,
            mailer,
            mail_from: mail_config.from.clone(),
            app_url: mail_config.app_url.trim_end_matches('/').to_string(),
            ttl: Duration::days(auth_config.invitation_ttl_days),
        }
    }

    /// Pending invitations of a stash. Owners and admins only.
    pub async fn list_for_stash(
        &self,
        ctx: &RequestContext,
        stash_id: Uuid,
    ) -> Result<Vec<Invitation>, AppError> {
        self.gate
            .require(stash_id, ctx.user_id, MemberRole::Admin)
            .await?;
        self.invitations.list_pending_for_stash(stash_id).await
    }

    /// Invite a user by address or account id. Owners and admins only.
    ///
    /// An address that belongs to a registered account is bound to that
    /// account. The invitation e-mail is best-effort.
    pub async fn invite(
        &self,
        ctx: &RequestContext,
        stash_id: Uuid,
        req: InviteRequest,
    ) -> Result<Invitation, AppError> {
        self.gate
            .require(stash_id, ctx.user_id, MemberRole::Admin)
            .await?;

        let email = req
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|e| !e.is_empty());
        if email.is_none() && req.user_id.is_none() {
            return Err(AppError::validation("Either email or userId is required"));
        }

        let stash = self
            .stashes
            .find_by_id(stash_id)
            .await?
            .ok_or_else(|| AppError::not_found("Stash not found"))?;

        let user_id = match (req.user_id, &email) {
            (Some(id), _) => Some(id),
            (None, Some(address)) => self.users.find_by_email(address).await?.map(|u| u.id),
            (None, None) => None,
        };

        if let Some(target_user) = user_id {
            if self.members.find(stash_id, target_user).await?.is_some() {
                return Err(AppError::validation("User is already a member"));
            }
        }

        let target = InvitationTarget {
            email: email.clone(),
            user_id,
        };
        if self
            .invitations
            .find_pending_for_target(stash_id, &target)
            .await?
            .is_some()
        {
            return Err(AppError::validation("An invitation is already pending"));
        }

        let expires_at = Utc::now() + self.ttl;
        let invitation = self
            .invitations
            .create(stash_id, &target, ctx.user_id, expires_at)
            .await?;

        info!(
            user_id = %ctx.user_id,
            %stash_id,
            invitation_id = %invitation.id,
            "Invitation created"
        );

        let recipient = match (email, user_id) {
            (Some(address), _) => Some(address),
            (None, Some(id)) => self.users.find_by_id(id).await?.map(|u| u.email),
            (None, None) => None,
        };
        if let Some(recipient) = recipient {
            self.send_invitation_email(ctx, &stash.name, &invitation, recipient, req.language)
                .await;
        }

        Ok(invitation)
    }

    /// Withdraw an invitation. Owners and admins only.
    pub async fn revoke(
        &self,
        ctx: &RequestContext,
        stash_id: Uuid,
        invitation_id: Uuid,
    ) -> Result<(), AppError> {
        self.gate
            .require(stash_id, ctx.user_id, MemberRole::Admin)
            .await?;
        if !self.invitations.delete(stash_id, invitation_id).await? {
            return Err(AppError::not_found("Invitation not found"));
        }
        info!(user_id = %ctx.user_id, %stash_id, %invitation_id, "Invitation revoked");
        Ok(())
    }

    /// The caller's pending, unexpired invitations.
    pub async fn list_mine(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<InvitationDetails>, AppError> {
        self.invitations
            .list_for_invitee(ctx.user_id, &ctx.email, Utc::now())
            .await
    }

    /// One invitation addressed to the caller.
    pub async fn get_mine(
        &self,
        ctx: &RequestContext,
        invitation_id: Uuid,
    ) -> Result<InvitationView, AppError> {
        let invitation = self.load_addressed(ctx, invitation_id).await?;
        let details = self
            .invitations
            .find_details(invitation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Invitation not found"))?;

        Ok(InvitationView {
            details,
            is_expired: invitation.is_expired_at(Utc::now()),
        })
    }

    /// Accept or decline an invitation addressed to the caller.
    pub async fn respond(
        &self,
        ctx: &RequestContext,
        invitation_id: Uuid,
        action: InvitationAction,
    ) -> Result<Invitation, AppError> {
        let invitation = self.load_addressed(ctx, invitation_id).await?;

        if invitation.status != InvitationStatus::Pending {
            return Err(AppError::validation("Invitation is no longer pending"));
        }
        if invitation.is_expired_at(Utc::now()) {
            self.invitations
                .set_status(invitation_id, InvitationStatus::Expired)
                .await?;
            return Err(AppError::validation("Invitation has expired"));
        }

        let updated = match action {
            InvitationAction::Accept => self.invitations.accept(&invitation, ctx.user_id).await?,
            InvitationAction::Decline => {
                self.invitations
                    .set_status(invitation_id, InvitationStatus::Declined)
                    .await?
            }
        };

        info!(
            user_id = %ctx.user_id,
            %invitation_id,
            stash_id = %invitation.stash_id,
            ?action,
            "Invitation answered"
        );
        Ok(updated)
    }

    async fn load_addressed(
        &self,
        ctx: &RequestContext,
        invitation_id: Uuid,
    ) -> Result<Invitation, AppError> {
        let invitation = self
            .invitations
            .find_by_id(invitation_id)
            .await?
            .ok_or_else(|| AppError::not_found("Invitation not found"))?;

        if !invitation.is_addressed_to(ctx.user_id, &ctx.email) {
            return Err(AppError::authorization(
                "This invitation is not addressed to you",
            ));
        }
        Ok(invitation)
    }

    async fn send_invitation_email(
        &self,
        ctx: &RequestContext,
        stash_name: &str,
        invitation: &Invitation,
        recipient: String,
        language: Language,
    ) {
        let inviter = match self.users.find_by_id(ctx.user_id).await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Failed to load inviter for invitation e-mail");
                None
            }
        };
        let inviter_name = inviter
            .as_ref()
            .map(|u| u.display_name().to_string())
            .unwrap_or_else(|| "Someone".to_string());
        let inviter_email = inviter.as_ref().map(|u| u.email.as_str()).unwrap_or("");

        let content = InvitationEmail {
            stash_name,
            inviter_name: &inviter_name,
            inviter_email,
            invitation_id: invitation.id,
            expires_at: invitation.expires_at,
            language,
        }
        .render(&self.app_url);

        if let Err(e) = self
            .mailer
            .send(OutgoingEmail {
                from: self.mail_from.clone(),
                to: vec![recipient],
                subject: content.subject,
                html: content.html,
            })
            .await
        {
            warn!(invitation_id = %invitation.id, error = %e, "Failed to send invitation e-mail");
        }
    }
}
