//! Storage provider implementations.

pub mod memory;
pub mod s3;
