//! Browser push subscriptions and the test notification.

use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;
use tracing::info;

use prepper_core::config::PushConfig;
use prepper_core::error::AppError;
use prepper_database::repositories::{ItemRepository, PushSubscriptionRepository};
use prepper_entity::push::PushSubscription;

use super::keys::normalize_key;
use super::sender::PushSender;
use crate::context::RequestContext;
use crate::notification::aggregator::{LOOKAHEAD_DAYS, test_message};
use crate::notification::service::deliver_to;

/// Outcome of a test notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TestPushResult {
    pub success: bool,
    pub sent: usize,
    pub total: usize,
}

/// Manages the caller's push subscriptions.
#[derive(Debug, Clone)]
pub struct PushService {
    subscriptions: Arc<PushSubscriptionRepository>,
    items: Arc<ItemRepository>,
    sender: Arc<dyn PushSender>,
    public_key: String,
}

impl PushService {
    /// Creates a new push service.
    pub fn new(
        subscriptions: Arc<PushSubscriptionRepository>,
        items: Arc<ItemRepository>,
        sender: Arc<dyn PushSender>,
        config: &PushConfig,
    ) -> Self {
        Self {
            subscriptions,
            items,
            sender,
            public_key: config.vapid_public_key.clone(),
        }
    }

    /// The VAPID public key browsers subscribe with.
    pub fn vapid_public_key(&self) -> Result<&str, AppError> {
        if self.public_key.is_empty() {
            return Err(AppError::service_unavailable(
                "Push notifications are not configured",
            ));
        }
        Ok(&self.public_key)
    }

    /// Register or refresh a browser subscription for the caller.
    pub async fn subscribe(
        &self,
        ctx: &RequestContext,
        endpoint: &str,
        p256dh: &str,
        auth: &str,
    ) -> Result<PushSubscription, AppError> {
        let endpoint = endpoint.trim();
        if !endpoint.starts_with("https://") {
            return Err(AppError::validation("Invalid subscription endpoint"));
        }
        let p256dh = normalize_key(p256dh)?;
        let auth = normalize_key(auth)?;

        let sub = self
            .subscriptions
            .upsert(ctx.user_id, endpoint, &p256dh, &auth)
            .await?;
        info!(user_id = %ctx.user_id, subscription_id = %sub.id, "Push subscription saved");
        Ok(sub)
    }

    /// Drop one of the caller's subscriptions.
    pub async fn unsubscribe(&self, ctx: &RequestContext, endpoint: &str) -> Result<(), AppError> {
        if endpoint.trim().is_empty() {
            return Err(AppError::validation("Endpoint is required"));
        }
        let removed = self
            .subscriptions
            .delete_by_endpoint(ctx.user_id, endpoint.trim())
            .await?;
        info!(user_id = %ctx.user_id, removed, "Push subscription removed");
        Ok(())
    }

    /// Push a summary of the caller's expiring items to all their browsers.
    pub async fn send_test(&self, ctx: &RequestContext) -> Result<TestPushResult, AppError> {
        let subs = self.subscriptions.find_by_user(ctx.user_id).await?;
        if subs.is_empty() {
            return Err(AppError::validation(
                "No push subscriptions found. Please enable notifications first.",
            ));
        }

        let now = ctx.request_time;
        let items = self
            .items
            .find_expiring_for_user(ctx.user_id, now + Duration::days(LOOKAHEAD_DAYS))
            .await?;
        let message = test_message(&items, now);

        let mut sent = 0;
        for sub in &subs {
            let (delivered, _) = deliver_to(
                self.sender.as_ref(),
                &self.subscriptions,
                sub,
                std::slice::from_ref(&message),
            )
            .await;
            sent += delivered;
        }

        info!(user_id = %ctx.user_id, sent, total = subs.len(), "Test notification sent");
        Ok(TestPushResult {
            success: true,
            sent,
            total: subs.len(),
        })
    }
}
