//! Object storage trait for photo bytes.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// An object read back from storage.
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Object contents.
    pub data: Bytes,
    /// Content type recorded at upload, if the backend kept one.
    pub content_type: Option<String>,
}

/// Flat key/value object store.
///
/// The S3 implementation lives in `prepper-storage`; an in-memory one is
/// available there for tests.
#[async_trait]
pub trait ObjectStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g. "s3", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store `data` under `key` with the given content type.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;

    /// Fetch the object stored under `key`.
    async fn get(&self, key: &str) -> AppResult<StoredObject>;

    /// Delete the object stored under `key`. Missing keys are not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
