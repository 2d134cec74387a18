//! Checklist repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use prepper_core::error::{AppError, ErrorKind};
use prepper_core::result::AppResult;
use prepper_entity::checklist::{ChecklistItem, CreateChecklistItem, DefaultChecklistEntry};

/// Repository for checklist entries.
#[derive(Debug, Clone)]
pub struct ChecklistRepository {
    pool: PgPool,
}

impl ChecklistRepository {
    /// Create a new checklist repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an entry by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ChecklistItem>> {
        sqlx::query_as::<_, ChecklistItem>("SELECT * FROM checklist_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find checklist item", e)
            })
    }

    /// Entries of a stash ordered by category, then name.
    pub async fn list(&self, stash_id: Uuid) -> AppResult<Vec<ChecklistItem>> {
        sqlx::query_as::<_, ChecklistItem>(
            "SELECT * FROM checklist_items WHERE stash_id = $1 ORDER BY category ASC, name ASC",
        )
        .bind(stash_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list checklist", e))
    }

    /// Insert the default entries for a stash that has none.
    ///
    /// Returns the number of rows written; zero when another request seeded
    /// the stash first.
    pub async fn seed_defaults(
        &self,
        stash_id: Uuid,
        entries: &[DefaultChecklistEntry],
    ) -> AppResult<u64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // serialize seeding per stash
        sqlx::query("SELECT id FROM stashes WHERE id = $1 FOR UPDATE")
            .bind(stash_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock stash", e))?;

        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM checklist_items WHERE stash_id = $1")
                .bind(stash_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count checklist", e)
                })?;
        if existing > 0 {
            return Ok(0);
        }

        let ids: Vec<Uuid> = entries.iter().map(|_| Uuid::new_v4()).collect();
        let names: Vec<&str> = entries.iter().map(|e| e.name).collect();
        let categories: Vec<&str> = entries.iter().map(|e| e.category.as_str()).collect();

        let result = sqlx::query(
            "INSERT INTO checklist_items (id, stash_id, name, category, is_default) \
             SELECT t.id, $1, t.name, t.category::item_category, TRUE \
             FROM UNNEST($2::uuid[], $3::text[], $4::text[]) AS t(id, name, category)",
        )
        .bind(stash_id)
        .bind(&ids)
        .bind(&names)
        .bind(&categories)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to seed checklist", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(result.rows_affected())
    }

    /// Create an entry.
    pub async fn create(&self, data: &CreateChecklistItem) -> AppResult<ChecklistItem> {
        sqlx::query_as::<_, ChecklistItem>(
            "INSERT INTO checklist_items (id, stash_id, name, category, is_default) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.stash_id)
        .bind(&data.name)
        .bind(data.category)
        .bind(data.is_default)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create checklist item", e)
        })
    }

    /// Update the checked flag and/or the linked item.
    pub async fn update(
        &self,
        id: Uuid,
        is_checked: Option<bool>,
        linked_item_id: Option<Option<Uuid>>,
    ) -> AppResult<ChecklistItem> {
        sqlx::query_as::<_, ChecklistItem>(
            "UPDATE checklist_items SET \
             is_checked = COALESCE($2, is_checked), \
             linked_item_id = CASE WHEN $3::boolean THEN $4::uuid ELSE linked_item_id END, \
             updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(is_checked)
        .bind(linked_item_id.is_some())
        .bind(linked_item_id.flatten())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update checklist item", e)
        })
    }

    /// Delete an entry.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM checklist_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete checklist item", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
