//! User domain entities.

pub mod model;
pub mod reset_token;

pub use model::{CreateUser, User};
pub use reset_token::PasswordResetToken;
