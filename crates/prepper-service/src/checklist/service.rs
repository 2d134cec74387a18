//! Checklist entries: lazy seeding, custom entries and item links.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use prepper_auth::StashGate;
use prepper_core::error::AppError;
use prepper_database::repositories::{ChecklistRepository, ItemRepository};
use prepper_entity::checklist::{ChecklistItem, CreateChecklistItem, DEFAULT_CHECKLIST};
use prepper_entity::item::Category;

use crate::context::RequestContext;

/// A partial update of a checklist entry.
#[derive(Debug, Clone, Default)]
pub struct ChecklistUpdate {
    pub is_checked: Option<bool>,
    /// `Some(None)` clears the link.
    pub linked_item_id: Option<Option<Uuid>>,
}

/// Manages checklist entries of a stash.
#[derive(Debug, Clone)]
pub struct ChecklistService {
    checklist: Arc<ChecklistRepository>,
    items: Arc<ItemRepository>,
    gate: Arc<StashGate>,
}

impl ChecklistService {
    /// Creates a new checklist service.
    pub fn new(
        checklist: Arc<ChecklistRepository>,
        items: Arc<ItemRepository>,
        gate: Arc<StashGate>,
    ) -> Self {
        Self {
            checklist,
            items,
            gate,
        }
    }

    /// Entries of a stash, seeding the defaults on first access.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        stash_id: Uuid,
    ) -> Result<Vec<ChecklistItem>, AppError> {
        self.gate.require_member(stash_id, ctx.user_id).await?;

        let entries = self.checklist.list(stash_id).await?;
        if !entries.is_empty() {
            return Ok(entries);
        }

        let seeded = self
            .checklist
            .seed_defaults(stash_id, &DEFAULT_CHECKLIST)
            .await?;
        if seeded > 0 {
            info!(%stash_id, seeded, "Default checklist seeded");
        }
        self.checklist.list(stash_id).await
    }

    /// Add a custom entry.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        stash_id: Uuid,
        name: &str,
        category: Category,
    ) -> Result<ChecklistItem, AppError> {
        self.gate.require_member(stash_id, ctx.user_id).await?;

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Name is required"));
        }

        let entry = self
            .checklist
            .create(&CreateChecklistItem {
                stash_id,
                name: name.to_string(),
                category,
                is_default: false,
            })
            .await?;

        info!(user_id = %ctx.user_id, %stash_id, entry_id = %entry.id, "Checklist entry created");
        Ok(entry)
    }

    /// Tick an entry or link it to an item of the same stash.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        entry_id: Uuid,
        update: ChecklistUpdate,
    ) -> Result<ChecklistItem, AppError> {
        let entry = self.load(ctx, entry_id).await?;

        if let Some(Some(item_id)) = update.linked_item_id {
            let same_stash = self
                .items
                .find_by_id(item_id)
                .await?
                .is_some_and(|item| item.stash_id == entry.stash_id);
            if !same_stash {
                return Err(AppError::validation(
                    "Linked item must belong to the same stash",
                ));
            }
        }

        self.checklist
            .update(entry_id, update.is_checked, update.linked_item_id)
            .await
    }

    /// Remove an entry.
    pub async fn delete(&self, ctx: &RequestContext, entry_id: Uuid) -> Result<(), AppError> {
        self.load(ctx, entry_id).await?;
        self.checklist.delete(entry_id).await?;
        info!(user_id = %ctx.user_id, %entry_id, "Checklist entry deleted");
        Ok(())
    }

    async fn load(&self, ctx: &RequestContext, entry_id: Uuid) -> Result<ChecklistItem, AppError> {
        let entry = self
            .checklist
            .find_by_id(entry_id)
            .await?
            .ok_or_else(|| AppError::not_found("Checklist item not found"))?;
        self.gate.require_member(entry.stash_id, ctx.user_id).await?;
        Ok(entry)
    }
}
