//! Expiration notifications: the daily digest and per-item alerts.

pub mod aggregator;
pub mod service;

pub use aggregator::{Bucket, Buckets, group_by_member, threshold_message};
pub use service::{ExpirationNotifier, NotificationSummary};
