//! # prepper-core
//!
//! Core crate for Prepper Helper. Contains the configuration schema, the
//! object storage trait and the unified error system shared by every other
//! crate in the workspace.
//!
//! This crate has **no** internal dependencies on other Prepper crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
