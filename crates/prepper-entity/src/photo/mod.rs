//! Item photo entities.

pub mod model;

pub use model::{CreatePhoto, Photo};
