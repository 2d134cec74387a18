//! Item CRUD scoped to stash membership.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use prepper_auth::StashGate;
use prepper_core::error::AppError;
use prepper_core::traits::storage::ObjectStorage;
use prepper_database::repositories::{ItemFilter, ItemRepository, PhotoRepository};
use prepper_entity::item::{Category, CreateItem, ExpirationStatus, Item, UpdateItem};
use prepper_entity::photo::Photo;

use crate::context::RequestContext;

/// Window of the "expiring soon" filter.
pub const EXPIRING_SOON_DAYS: i64 = 7;

/// Query parameters for listing items.
#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
    pub stash_id: Option<Uuid>,
    pub category: Option<Category>,
    pub search: Option<String>,
    pub expiring_soon: bool,
}

/// A photo with the URL it is served from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoView {
    #[serde(flatten)]
    pub photo: Photo,
    pub url: String,
}

impl From<Photo> for PhotoView {
    fn from(photo: Photo) -> Self {
        let url = photo.url();
        Self { photo, url }
    }
}

/// An item with its photos and computed expiration status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    #[serde(flatten)]
    pub item: Item,
    pub expiration_status: ExpirationStatus,
    pub photos: Vec<PhotoView>,
}

impl ItemView {
    fn build(item: Item, photos: Vec<Photo>, now: DateTime<Utc>) -> Self {
        Self {
            expiration_status: item.expiration_status(now),
            photos: photos.into_iter().map(PhotoView::from).collect(),
            item,
        }
    }
}

/// Handles inventory items.
#[derive(Debug, Clone)]
pub struct ItemService {
    items: Arc<ItemRepository>,
    photos: Arc<PhotoRepository>,
    gate: Arc<StashGate>,
    storage: Arc<dyn ObjectStorage>,
}

impl ItemService {
    /// Creates a new item service.
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

    /// Items of one stash, soonest expiration first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: ItemQuery,
    ) -> Result<Vec<ItemView>, AppError> {
        let stash_id = query
            .stash_id
            .ok_or_else(|| AppError::validation("stashId is required"))?;
        self.gate.require_member(stash_id, ctx.user_id).await?;

        let now = ctx.request_time;
        let filter = ItemFilter {
            category: query.category,
            search: query
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            expiring_between: query
                .expiring_soon
                .then(|| (now, now + Duration::days(EXPIRING_SOON_DAYS))),
        };

        let items = self.items.list(stash_id, &filter).await?;
        let ids: Vec<Uuid> = items.iter().map(|i| i.id).collect();
        let mut photos: HashMap<Uuid, Vec<Photo>> = HashMap::new();
        for photo in self.photos.list_for_items(&ids).await? {
            photos.entry(photo.item_id).or_default().push(photo);
        }

        Ok(items
            .into_iter()
            .map(|item| {
                let own = photos.remove(&item.id).unwrap_or_default();
                ItemView::build(item, own, now)
            })
            .collect())
    }

    /// Create an item in a stash the caller belongs to.
    pub async fn create(&self, ctx: &RequestContext, data: CreateItem) -> Result<ItemView, AppError> {
        self.gate.require_member(data.stash_id, ctx.user_id).await?;
        validate_name(&data.name)?;
        validate_quantity(data.quantity)?;

        let item = self
            .items
            .create(&CreateItem {
                created_by: ctx.user_id,
                name: data.name.trim().to_string(),
                ..data
            })
            .await?;

        info!(user_id = %ctx.user_id, item_id = %item.id, stash_id = %item.stash_id, "Item created");
        Ok(ItemView::build(item, Vec::new(), ctx.request_time))
    }

    /// One item with its photos.
    pub async fn get(&self, ctx: &RequestContext, item_id: Uuid) -> Result<ItemView, AppError> {
        let item = self.load(ctx, item_id).await?;
        let photos = self.photos.list_for_items(&[item.id]).await?;
        Ok(ItemView::build(item, photos, ctx.request_time))
    }

    /// Apply a partial update.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        item_id: Uuid,
        mut data: UpdateItem,
    ) -> Result<ItemView, AppError> {
        self.load(ctx, item_id).await?;

        if let Some(name) = &data.name {
            validate_name(name)?;
            data.name = Some(name.trim().to_string());
        }
        if let Some(quantity) = data.quantity {
            validate_quantity(quantity)?;
        }

        let item = self.items.update(item_id, &data).await?;
        let photos = self.photos.list_for_items(&[item.id]).await?;

        info!(user_id = %ctx.user_id, %item_id, "Item updated");
        Ok(ItemView::build(item, photos, ctx.request_time))
    }

    /// Delete an item; photo objects are removed best-effort first.
    pub async fn delete(&self, ctx: &RequestContext, item_id: Uuid) -> Result<(), AppError> {
        self.load(ctx, item_id).await?;

        for photo in self.photos.list_for_items(&[item_id]).await? {
            if let Err(e) = self.storage.delete(&photo.storage_key).await {
                warn!(%item_id, photo_id = %photo.id, error = %e, "Failed to delete photo object");
            }
        }

        self.items.delete(item_id).await?;
        info!(user_id = %ctx.user_id, %item_id, "Item deleted");
        Ok(())
    }

    /// Load an item the caller may access.
    pub(crate) async fn load(&self, ctx: &RequestContext, item_id: Uuid) -> Result<Item, AppError> {
        let item = self
            .items
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::not_found("Item not found"))?;
        self.gate.require_member(item.stash_id, ctx.user_id).await?;
        Ok(item)
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    Ok(())
}

fn validate_quantity(quantity: i32) -> Result<(), AppError> {
    if quantity < 1 {
        return Err(AppError::validation("Quantity must be at least 1"));
    }
    Ok(())
}
