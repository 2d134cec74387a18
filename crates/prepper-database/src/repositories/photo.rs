//! Photo repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use prepper_core::error::{AppError, ErrorKind};
use prepper_core::result::AppResult;
use prepper_entity::photo::{CreatePhoto, Photo};

/// Repository for photo metadata rows.
#[derive(Debug, Clone)]
pub struct PhotoRepository {
    pool: PgPool,
}

impl PhotoRepository {
    /// Create a new photo repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a photo by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Photo>> {
        sqlx::query_as::<_, Photo>("SELECT * FROM photos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find photo", e))
    }

    /// Photos of the given items, oldest first.
    pub async fn list_for_items(&self, item_ids: &[Uuid]) -> AppResult<Vec<Photo>> {
        sqlx::query_as::<_, Photo>(
            "SELECT * FROM photos WHERE item_id = ANY($1) ORDER BY created_at ASC",
        )
        .bind(item_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list photos", e))
    }

    /// Object keys of every photo in a stash.
    pub async fn keys_for_stash(&self, stash_id: Uuid) -> AppResult<Vec<String>> {
        sqlx::query_scalar(
            "SELECT p.storage_key FROM photos p JOIN items i ON i.id = p.item_id \
             WHERE i.stash_id = $1",
        )
        .bind(stash_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list photo keys", e))
    }

    /// Record an uploaded photo.
    pub async fn create(&self, data: &CreatePhoto) -> AppResult<Photo> {
        sqlx::query_as::<_, Photo>(
            "INSERT INTO photos (id, item_id, storage_key, original_name, mime_type, size) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(data.item_id)
        .bind(&data.storage_key)
        .bind(&data.original_name)
        .bind(&data.mime_type)
        .bind(data.size)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create photo", e))
    }

    /// Store the raw vision analysis on a photo.
    pub async fn set_analysis(&self, id: Uuid, analysis: &serde_json::Value) -> AppResult<()> {
        sqlx::query("UPDATE photos SET ai_analysis = $2 WHERE id = $1")
            .bind(id)
            .bind(analysis)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to store photo analysis", e)
            })?;
        Ok(())
    }

    /// Delete a photo row.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete photo", e))?;
        Ok(result.rows_affected() > 0)
    }
}
