//! Inventory items and their photos.

pub mod photo;
pub mod service;

pub use photo::{PhotoService, PhotoUpload};
pub use service::{ItemQuery, ItemService, ItemView, PhotoView};
