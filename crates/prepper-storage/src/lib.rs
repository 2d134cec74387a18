//! # prepper-storage
//!
//! Object storage for item photos. Production deployments use an
//! S3-compatible store (MinIO or AWS); tests use the in-memory provider.

pub mod keys;
pub mod providers;

pub use keys::photo_key;
pub use providers::memory::MemoryStorage;
pub use providers::s3::S3Storage;
