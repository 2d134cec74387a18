//! Web push subscriptions.

pub mod model;

pub use model::{PushMessage, PushSubscription};
