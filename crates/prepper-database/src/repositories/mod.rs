//! Repository implementations for all Prepper entities.

pub mod checklist;
pub mod invitation;
pub mod item;
pub mod member;
pub mod photo;
pub mod push_subscription;
pub mod reset_token;
pub mod stash;
pub mod user;

pub use checklist::ChecklistRepository;
pub use invitation::InvitationRepository;
pub use item::{ItemFilter, ItemRepository};
pub use member::MemberRepository;
pub use photo::PhotoRepository;
pub use push_subscription::PushSubscriptionRepository;
pub use reset_token::ResetTokenRepository;
pub use stash::StashRepository;
pub use user::UserRepository;

use prepper_core::error::{AppError, ErrorKind};

/// Map a sqlx error, turning unique-constraint violations into conflicts.
pub(crate) fn map_write_error(e: sqlx::Error, context: &str, conflict: &str) -> AppError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return AppError::conflict(conflict);
        }
    }
    AppError::with_source(ErrorKind::Database, context.to_string(), e)
}
