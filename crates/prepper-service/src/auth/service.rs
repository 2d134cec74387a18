//! Registration, login and the password reset flow.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use prepper_auth::jwt::AccessToken;
use prepper_auth::{JwtEncoder, PasswordHasher, PasswordValidator};
use prepper_core::config::{AuthConfig, MailConfig};
use prepper_core::error::AppError;
use prepper_database::repositories::{ResetTokenRepository, UserRepository};
use prepper_entity::user::{CreateUser, User};

use super::token::generate_reset_token;
use crate::context::RequestContext;
use crate::language::Language;
use crate::mail::{Mailer, OutgoingEmail, PasswordResetEmail};

/// Name of the stash every new account starts with.
pub const PERSONAL_STASH_NAME: &str = "My Stash";

/// Data for creating an account.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    /// E-mail address; lowercased before storage.
    pub email: String,
    /// Plain-text password.
    pub password: String,
    /// Optional display name.
    pub name: Option<String>,
}

/// A successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    #[serde(flatten)]
    pub token: AccessToken,
    pub user: User,
}

/// Handles account creation, credential checks and password recovery.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<UserRepository>,
    reset_tokens: Arc<ResetTokenRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    mailer: Arc<dyn Mailer>,
    mail_from: String,
    app_url: String,
    reset_ttl: Duration,
}

impl AuthService {
    /// Creates a new auth service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<UserRepository>,
        reset_tokens: Arc<ResetTokenRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        mailer: Arc<dyn Mailer>,
        auth_config: &AuthConfig,
        mail_config: &MailConfig,
    ) -> Self {
        Self {
            users,
            reset_tokens,
            hasher,
            validator,
            encoder,
            mailer,
            mail_from: mail_config.from.clone(),
            app_url: mail_config.app_url.trim_end_matches('/').to_string(),
            reset_ttl: Duration::minutes(auth_config.reset_token_ttl_minutes),
        }
    }

    /// Create an account together with its personal stash.
    pub async fn register(&self, req: RegisterRequest) -> Result<User, AppError> {
        let email = normalize_email(&req.email);
        if email.is_empty() || req.password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }
        self.validator.validate(&req.password)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("User already exists"));
        }

        let password_hash = self.hasher.hash_password(&req.password)?;
        let name = req
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let user = self
            .users
            .create_with_stash(
                &CreateUser {
                    email,
                    password_hash,
                    name,
                },
                PERSONAL_STASH_NAME,
            )
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Verify credentials and issue an access token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let invalid = || AppError::authentication("Invalid email or password");

        let user = self
            .users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(invalid)?;
        let hash = user.password_hash.as_deref().ok_or_else(invalid)?;
        if !self.hasher.verify_password(password, hash)? {
            return Err(invalid());
        }

        let token = self.encoder.generate_access_token(user.id, &user.email)?;
        info!(user_id = %user.id, "User logged in");
        Ok(LoginResult { token, user })
    }

    /// The caller's account.
    pub async fn me(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Issue a reset token and e-mail it.
    ///
    /// Succeeds whether or not the address is registered, so the endpoint
    /// cannot be used to discover accounts. Mail failures are logged only.
    pub async fn forgot_password(&self, email: &str, language: Language) -> Result<(), AppError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(AppError::validation("Email is required"));
        }

        let Some(user) = self.users.find_by_email(&email).await? else {
            debug!("Password reset requested for unknown address");
            return Ok(());
        };

        let token = generate_reset_token();
        let expires_at = Utc::now() + self.reset_ttl;
        self.reset_tokens
            .replace_for_user(user.id, &token, expires_at)
            .await?;

        let content = PasswordResetEmail {
            user_name: user.display_name(),
            reset_token: &token,
            expires_at,
            language,
        }
        .render(&self.app_url);

        if let Err(e) = self
            .mailer
            .send(OutgoingEmail {
                from: self.mail_from.clone(),
                to: vec![user.email.clone()],
                subject: content.subject,
                html: content.html,
            })
            .await
        {
            warn!(user_id = %user.id, error = %e, "Failed to send password reset e-mail");
        }

        info!(user_id = %user.id, "Password reset token issued");
        Ok(())
    }

    /// Consume a reset token and set a new password.
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<(), AppError> {
        if token.is_empty() || password.is_empty() {
            return Err(AppError::validation("Token and password are required"));
        }
        self.validator.validate(password)?;

        let invalid = || AppError::validation("Invalid or expired reset token");
        let record = self.reset_tokens.take(token).await?.ok_or_else(invalid)?;
        if record.is_expired_at(Utc::now()) {
            return Err(invalid());
        }

        let hash = self.hasher.hash_password(password)?;
        self.users.update_password(record.user_id, &hash).await?;

        info!(user_id = %record.user_id, "Password reset");
        Ok(())
    }
}

/// Trim and lowercase an e-mail address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
