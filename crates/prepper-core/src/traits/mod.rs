//! Traits implemented by infrastructure crates.

pub mod storage;
