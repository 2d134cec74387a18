//! # prepper-service
//!
//! Business logic service layer for Prepper Helper. Each service
//! orchestrates repositories, the role gate, object storage and the
//! outbound integrations (mail, web push, vision model) to implement one
//! group of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod checklist;
pub mod context;
pub mod cron;
pub mod item;
pub mod language;
pub mod mail;
pub mod notification;
pub mod push;
pub mod stash;
pub mod vision;

pub use auth::AuthService;
pub use checklist::ChecklistService;
pub use context::RequestContext;
pub use cron::{SecretSource, verify_cron_secret};
pub use item::{ItemService, PhotoService};
pub use language::Language;
pub use mail::{Mailer, ResendMailer};
pub use notification::{ExpirationNotifier, NotificationSummary};
pub use push::{PushSender, PushService, WebPushSender};
pub use stash::{InvitationService, StashService};
pub use vision::{AnalysisService, AnthropicVision, VisionModel};
