//! Photo analysis and write-back of the extracted fields.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use prepper_auth::StashGate;
use prepper_core::error::AppError;
use prepper_database::repositories::{ItemRepository, PhotoRepository};
use prepper_entity::item::{Category, Item, UpdateItem};

use super::client::{ImageInput, VisionModel};
use super::parse::{AnalysisResult, parse_analysis};
use super::prompt::build_prompt;
use crate::context::RequestContext;
use crate::language::Language;

/// Media types the model accepts.
pub const SUPPORTED_MEDIA_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// An analysis request.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    /// Photo to attach the result to.
    pub photo_id: Option<Uuid>,
    pub image: ImageInput,
    /// Close-up of the date stamp.
    pub expiration_image: Option<ImageInput>,
    pub language: Language,
}

/// Runs the vision model and stores its findings.
#[derive(Debug, Clone)]
pub struct AnalysisService {
    model: Arc<dyn VisionModel>,
    photos: Arc<PhotoRepository>,
    items: Arc<ItemRepository>,
    gate: Arc<StashGate>,
}

impl AnalysisService {
    /// Creates a new analysis service.
    pub fn new(
        model: Arc<dyn VisionModel>,
        photos: Arc<PhotoRepository>,
        items: Arc<ItemRepository>,
        gate: Arc<StashGate>,
    ) -> Self {
        Self {
            model,
            photos,
            items,
            gate,
        }
    }

    /// Analyze one or two images.
    ///
    /// With a `photo_id` the result is stored on the photo and fills the
    /// item's empty fields.
    pub async fn analyze(
        &self,
        ctx: &RequestContext,
        req: AnalyzeRequest,
    ) -> Result<AnalysisResult, AppError> {
        validate_image(&req.image)?;
        if let Some(image) = &req.expiration_image {
            validate_image(image)?;
        }

        let target = match req.photo_id {
            Some(photo_id) => Some(self.load_target(ctx, photo_id).await?),
            None => None,
        };

        let mut images = vec![req.image];
        images.extend(req.expiration_image);
        let prompt = build_prompt(images.len() > 1, req.language, ctx.request_time.date_naive());

        let reply = self.model.complete(&images, &prompt).await?;
        let analysis = parse_analysis(&reply)?;

        if let Some((photo_id, item)) = target {
            self.photos
                .set_analysis(photo_id, &serde_json::to_value(&analysis)?)
                .await?;
            self.items
                .update(item.id, &fill_empty_fields(&item, &analysis))
                .await?;
            info!(user_id = %ctx.user_id, %photo_id, item_id = %item.id, "AI analysis applied");
        }

        Ok(analysis)
    }

    async fn load_target(
        &self,
        ctx: &RequestContext,
        photo_id: Uuid,
    ) -> Result<(Uuid, Item), AppError> {
        let photo = self
            .photos
            .find_by_id(photo_id)
            .await?
            .ok_or_else(|| AppError::not_found("Photo not found"))?;
        let item = self
            .items
            .find_by_id(photo.item_id)
            .await?
            .ok_or_else(|| AppError::not_found("Photo not found"))?;
        self.gate.require_member(item.stash_id, ctx.user_id).await?;
        Ok((photo.id, item))
    }
}

fn validate_image(image: &ImageInput) -> Result<(), AppError> {
    if image.base64.is_empty() || image.media_type.is_empty() {
        return Err(AppError::validation(
            "Image data and mime type are required",
        ));
    }
    if !SUPPORTED_MEDIA_TYPES.contains(&image.media_type.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported image type: {}",
            image.media_type
        )));
    }
    Ok(())
}

/// The item update implied by an analysis: flag the item as AI-extracted
/// and fill only what is still empty.
pub fn fill_empty_fields(item: &Item, analysis: &AnalysisResult) -> UpdateItem {
    let mut update = UpdateItem {
        ai_extracted: Some(true),
        ..Default::default()
    };

    if item.name.trim().is_empty() && !analysis.name.trim().is_empty() {
        update.name = Some(analysis.name.trim().to_string());
    }
    if item.description.is_none() {
        if let Some(description) = analysis.description.as_ref().filter(|d| !d.is_empty()) {
            update.description = Some(Some(description.clone()));
        }
    }
    if item.expiration_date.is_none() {
        if let Some(date) = analysis.expiration_date.as_deref().and_then(parse_date) {
            update.expiration_date = Some(Some(date));
        }
    }
    if item.category == Category::Other {
        if let Ok(category) = analysis.category.parse::<Category>() {
            update.category = Some(category);
        }
    }

    update
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or an RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
