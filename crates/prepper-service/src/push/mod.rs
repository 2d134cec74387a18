//! Web push delivery and subscription management.

pub mod keys;
pub mod sender;
pub mod service;

pub use keys::normalize_key;
pub use sender::{DeliveryError, PushSender, WebPushSender};
pub use service::{PushService, TestPushResult};
