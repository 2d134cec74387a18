//! Stash (household) domain entities.

pub mod invitation;
pub mod member;
pub mod model;
pub mod role;

pub use invitation::{Invitation, InvitationDetails, InvitationStatus, InvitationTarget};
pub use member::{MemberProfile, StashMember};
pub use model::{Stash, StashSummary};
pub use role::MemberRole;
