//! Transactional e-mail: templates and the delivery client.

pub mod client;
pub mod templates;

pub use client::{Mailer, OutgoingEmail, ResendMailer};
pub use templates::{EmailContent, InvitationEmail, PasswordResetEmail};
