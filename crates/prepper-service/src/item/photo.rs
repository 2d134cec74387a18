//! Photo upload, retrieval and deletion.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use prepper_auth::StashGate;
use prepper_core::error::AppError;
use prepper_core::traits::storage::{ObjectStorage, StoredObject};
use prepper_database::repositories::{ItemRepository, PhotoRepository};
use prepper_entity::photo::{CreatePhoto, Photo};
use prepper_storage::photo_key;

use crate::context::RequestContext;

/// Content type assumed when the client does not send one.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub item_id: Uuid,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Handles item photos in object storage.
#[derive(Debug, Clone)]
pub struct PhotoService {
    items: Arc<ItemRepository>,
    photos: Arc<PhotoRepository>,
    gate: Arc<StashGate>,
    storage: Arc<dyn ObjectStorage>,
}

impl PhotoService {
    /// Creates a new photo service.
    pub fn new(
        items: Arc<ItemRepository>,
        photos: Arc<PhotoRepository>,
        gate: Arc<StashGate>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            items,
            photos,
            gate,
            storage,
        }
    }

    /// Store a photo for an item and record it.
    pub async fn upload(&self, ctx: &RequestContext, upload: PhotoUpload) -> Result<Photo, AppError> {
        if upload.data.is_empty() {
            return Err(AppError::validation("Missing file"));
        }

        let item = self
            .items
            .find_by_id(upload.item_id)
            .await?
            .ok_or_else(|| AppError::not_found("Item not found"))?;
        self.gate.require_member(item.stash_id, ctx.user_id).await?;

        let key = photo_key(
            ctx.user_id,
            item.id,
            Uuid::new_v4(),
            upload.file_name.as_deref(),
        );
        let mime_type = upload
            .content_type
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
        let size = upload.data.len() as i64;

        self.storage.put(&key, upload.data, &mime_type).await?;

        let created = self
            .photos
            .create(&CreatePhoto {
                item_id: item.id,
                storage_key: key.clone(),
                original_name: upload.file_name,
                mime_type,
                size,
            })
            .await;

        let photo = match created {
            Ok(photo) => photo,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&key).await {
                    warn!(key = %key, error = %cleanup, "Failed to remove orphaned photo object");
                }
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id,
            item_id = %item.id,
            photo_id = %photo.id,
            size,
            "Photo uploaded"
        );
        Ok(photo)
    }

    /// Photo row and its bytes.
    pub async fn fetch(
        &self,
        ctx: &RequestContext,
        photo_id: Uuid,
    ) -> Result<(Photo, StoredObject), AppError> {
        let photo = self.load(ctx, photo_id).await?;
        let object = self.storage.get(&photo.storage_key).await?;
        Ok((photo, object))
    }

    /// Photo metadata, after the membership check.
    pub async fn get(&self, ctx: &RequestContext, photo_id: Uuid) -> Result<Photo, AppError> {
        self.load(ctx, photo_id).await
    }

    /// Delete a photo; the object is removed best-effort before the row.
    pub async fn delete(&self, ctx: &RequestContext, photo_id: Uuid) -> Result<(), AppError> {
        let photo = self.load(ctx, photo_id).await?;

        if let Err(e) = self.storage.delete(&photo.storage_key).await {
            warn!(%photo_id, error = %e, "Failed to delete photo object");
        }
        self.photos.delete(photo_id).await?;

        info!(user_id = %ctx.user_id, %photo_id, "Photo deleted");
        Ok(())
    }

    async fn load(&self, ctx: &RequestContext, photo_id: Uuid) -> Result<Photo, AppError> {
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
        Ok(photo)
    }
}
