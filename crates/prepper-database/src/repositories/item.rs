//! Item repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use prepper_core::error::{AppError, ErrorKind};
use prepper_core::result::AppResult;
use prepper_entity::item::{Category, CreateItem, Item, UpdateItem};

/// Filters for listing the items of one stash.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Restrict to a category.
    pub category: Option<Category>,
    /// Case-insensitive substring of name or description.
    pub search: Option<String>,
    /// Only items expiring within `[from, until]`.
    pub expiring_between: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

/// Repository for inventory items.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// Create a new item repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an item by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Item>> {
        sqlx::query_as::<_, Item>("SELECT * FROM items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find item", e))
    }

    /// List the items of a stash, soonest expiration first, undated last.
    pub async fn list(&self, stash_id: Uuid, filter: &ItemFilter) -> AppResult<Vec<Item>> {
        let pattern = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{s}%"));
        let (from, until) = filter.expiring_between.unzip();

        sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE stash_id = $1 \
             AND ($2::item_category IS NULL OR category = $2) \
             AND ($3::text IS NULL OR name ILIKE $3 OR description ILIKE $3) \
             AND ($4::timestamptz IS NULL OR (expiration_date >= $4 AND expiration_date <= $5)) \
             ORDER BY expiration_date ASC NULLS LAST, created_at DESC",
        )
        .bind(stash_id)
        .bind(filter.category)
        .bind(pattern)
        .bind(from)
        .bind(until)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list items", e))
    }

    /// All items, across stashes, with an expiration date at or before `until`.
    pub async fn find_expiring_before(&self, until: DateTime<Utc>) -> AppResult<Vec<Item>> {
        sqlx::query_as::<_, Item>(
            "SELECT * FROM items WHERE expiration_date IS NOT NULL AND expiration_date <= $1 \
             ORDER BY expiration_date ASC",
        )
        .bind(until)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find expiring items", e)
        })
    }

    /// Items in any of the user's stashes expiring at or before `until`.
    pub async fn find_expiring_for_user(
        &self,
        user_id: Uuid,
        until: DateTime<Utc>,
    ) -> AppResult<Vec<Item>> {
        sqlx::query_as::<_, Item>(
            "SELECT i.* FROM items i JOIN stash_members m ON m.stash_id = i.stash_id \
             WHERE m.user_id = $1 AND i.expiration_date IS NOT NULL AND i.expiration_date <= $2 \
             ORDER BY i.expiration_date ASC",
        )
        .bind(user_id)
        .bind(until)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find expiring items", e)
        })
    }

    /// Create an item.
    pub async fn create(&self, data: &CreateItem) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            "INSERT INTO items (id, stash_id, created_by, name, description, category, quantity, expiration_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.stash_id)
        .bind(data.created_by)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.category)
        .bind(data.quantity)
        .bind(data.expiration_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create item", e))
    }

    /// Apply a partial update.
    pub async fn update(&self, id: Uuid, data: &UpdateItem) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            "UPDATE items SET \
             name = COALESCE($2, name), \
             description = CASE WHEN $3::boolean THEN $4::text ELSE description END, \
             category = COALESCE($5, category), \
             quantity = COALESCE($6, quantity), \
             expiration_date = CASE WHEN $7::boolean THEN $8::timestamptz ELSE expiration_date END, \
             ai_extracted = COALESCE($9, ai_extracted), \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(data.description.is_some())
        .bind(data.description.clone().flatten())
        .bind(data.category)
        .bind(data.quantity)
        .bind(data.expiration_date.is_some())
        .bind(data.expiration_date.flatten())
        .bind(data.ai_extracted)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update item", e))
    }

    /// Delete an item; its photos cascade.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete item", e))?;
        Ok(result.rows_affected() > 0)
    }
}
