//! Stash membership gate.

pub mod membership;

pub use membership::{StashGate, check_membership};
