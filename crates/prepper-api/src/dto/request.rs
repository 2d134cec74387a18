//! Request DTOs for API endpoints.
//!
//! Required string fields default to empty so that a missing field reaches
//! the service layer and is rejected there with a 400.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;

use prepper_core::error::AppError;
use prepper_entity::item::Category;
use prepper_entity::stash::MemberRole;
use prepper_service::Language;
use prepper_service::stash::InvitationAction;
use prepper_service::vision::parse_date;

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Language code as sent by the client.
fn language(code: Option<&str>) -> Language {
    code.map(Language::from_code).unwrap_or_default()
}

/// Parse an optional `YYYY-MM-DD` or RFC 3339 date.
fn expiration(value: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => parse_date(v)
            .map(Some)
            .ok_or_else(|| AppError::validation(format!("Invalid expiration date: {v}"))),
    }
}

// ── Auth ─────────────────────────────────────────────────────

/// POST /api/auth/register
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// POST /api/auth/login
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/forgot-password
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForgotPasswordRequest {
    pub email: String,
    pub language: Option<String>,
}

impl ForgotPasswordRequest {
    pub fn language(&self) -> Language {
        language(self.language.as_deref())
    }
}

/// POST /api/auth/reset-password
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

// ── Stashes ──────────────────────────────────────────────────

/// POST /api/stashes, PATCH /api/stashes/{id}
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StashNameRequest {
    pub name: String,
}

/// PATCH /api/stashes/{id}/members/{userId}
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: MemberRole,
}

/// POST /api/stashes/{id}/invitations
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct InviteRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub user_id: Option<Uuid>,
    pub language: Option<String>,
}

impl InviteRequest {
    pub fn into_service(self) -> prepper_service::stash::InviteRequest {
        prepper_service::stash::InviteRequest {
            language: language(self.language.as_deref()),
            email: self.email.filter(|e| !e.trim().is_empty()),
            user_id: self.user_id,
        }
    }
}

/// PATCH /api/invitations/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct RespondInvitationRequest {
    pub action: InvitationAction,
}

// ── Items ────────────────────────────────────────────────────

/// GET /api/items query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemListQuery {
    pub stash_id: Option<Uuid>,
    pub category: Option<Category>,
    pub search: Option<String>,
    pub expiring_soon: Option<bool>,
}

impl From<ItemListQuery> for prepper_service::item::ItemQuery {
    fn from(q: ItemListQuery) -> Self {
        Self {
            stash_id: q.stash_id,
            category: q.category,
            search: q.search.filter(|s| !s.trim().is_empty()),
            expiring_soon: q.expiring_soon.unwrap_or(false),
        }
    }
}

/// POST /api/items
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub stash_id: Uuid,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    pub expiration_date: Option<String>,
}

fn default_quantity() -> i32 {
    1
}

impl CreateItemRequest {
    /// Convert into the entity insert; `created_by` is set by the service.
    pub fn into_entity(self, created_by: Uuid) -> Result<prepper_entity::item::CreateItem, AppError> {
        Ok(prepper_entity::item::CreateItem {
            expiration_date: expiration(self.expiration_date.as_deref())?,
            stash_id: self.stash_id,
            created_by,
            name: self.name,
            description: self.description.filter(|d| !d.trim().is_empty()),
            category: self.category,
            quantity: self.quantity,
        })
    }
}

/// PATCH /api/items/{id}
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub category: Option<Category>,
    pub quantity: Option<i32>,
    #[serde(deserialize_with = "nullable")]
    pub expiration_date: Option<Option<String>>,
}

impl UpdateItemRequest {
    pub fn into_entity(self) -> Result<prepper_entity::item::UpdateItem, AppError> {
        let expiration_date = match self.expiration_date {
            None => None,
            Some(value) => Some(expiration(value.as_deref())?),
        };
        Ok(prepper_entity::item::UpdateItem {
            name: self.name,
            description: self
                .description
                .map(|d| d.filter(|d| !d.trim().is_empty())),
            category: self.category,
            quantity: self.quantity,
            expiration_date,
            ai_extracted: None,
        })
    }
}

// ── Checklist ────────────────────────────────────────────────

/// GET /api/checklist query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChecklistQuery {
    pub stash_id: Option<Uuid>,
}

/// POST /api/checklist
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChecklistRequest {
    pub stash_id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Category,
}

/// PATCH /api/checklist/{id}
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateChecklistRequest {
    pub is_checked: Option<bool>,
    #[serde(deserialize_with = "nullable")]
    pub linked_item_id: Option<Option<Uuid>>,
}

// ── AI ───────────────────────────────────────────────────────

/// POST /api/ai/analyze
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub photo_id: Option<Uuid>,
    pub image_base64: String,
    pub mime_type: String,
    pub expiration_image_base64: Option<String>,
    pub expiration_mime_type: Option<String>,
    pub language: Option<String>,
}

impl AnalyzeRequest {
    pub fn into_service(self) -> prepper_service::vision::AnalyzeRequest {
        use prepper_service::vision::ImageInput;

        let expiration_image = self
            .expiration_image_base64
            .filter(|data| !data.is_empty())
            .map(|base64| ImageInput {
                base64,
                media_type: self
                    .expiration_mime_type
                    .clone()
                    .unwrap_or_else(|| self.mime_type.clone()),
            });

        prepper_service::vision::AnalyzeRequest {
            photo_id: self.photo_id,
            language: language(self.language.as_deref()),
            image: ImageInput {
                base64: self.image_base64,
                media_type: self.mime_type,
            },
            expiration_image,
        }
    }
}

// ── Push ─────────────────────────────────────────────────────

/// Browser-generated subscription keys.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

/// POST /api/push/subscribe
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SubscribeRequest {
    #[validate(url(message = "Invalid subscription endpoint"))]
    pub endpoint: String,
    pub keys: SubscriptionKeys,
}

/// DELETE /api/push/subscribe
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UnsubscribeRequest {
    pub endpoint: String,
}
