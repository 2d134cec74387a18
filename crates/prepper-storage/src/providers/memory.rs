//! In-memory object storage.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use prepper_core::error::AppError;
use prepper_core::result::AppResult;
use prepper_core::traits::storage::{ObjectStorage, StoredObject};

/// Object storage backed by a map; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Whether the store holds no objects.
    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: Some(content_type.to_string()),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<StoredObject> {
        self.objects
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Object not found: {key}")))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.objects.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryStorage::new();
        store
            .put("u/i/p.jpg", Bytes::from_static(b"jpeg"), "image/jpeg")
            .await
            .unwrap();

        let obj = store.get("u/i/p.jpg").await.unwrap();
        assert_eq!(obj.data.as_ref(), b"jpeg");
        assert_eq!(obj.content_type.as_deref(), Some("image/jpeg"));

        store.delete("u/i/p.jpg").await.unwrap();
        assert!(store.get("u/i/p.jpg").await.unwrap_err().is_not_found());
        store.delete("u/i/p.jpg").await.unwrap();
        assert!(store.is_empty().await);
    }
}
