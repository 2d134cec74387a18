//! Stash management, membership and invitations.

pub mod invitation;
pub mod service;

pub use invitation::{InvitationAction, InvitationService, InvitationView, InviteRequest};
pub use service::{StashDetails, StashService};
