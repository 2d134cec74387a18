//! Account registration, login and password recovery.

pub mod service;
pub mod token;

pub use service::{AuthService, LoginResult, RegisterRequest};
pub use token::generate_reset_token;
