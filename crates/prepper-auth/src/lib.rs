//! # prepper-auth
//!
//! Authentication and authorization for Prepper Helper.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing and the minimum-length policy
//! - `jwt`: identity-only access tokens (roles are never embedded)
//! - `gate`: per-request stash membership and role checks

pub mod gate;
pub mod jwt;
pub mod password;

pub use gate::{StashGate, check_membership};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
