//! Delivery of expiration notifications to members' browsers.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use prepper_core::error::AppError;
use prepper_database::repositories::{ItemRepository, MemberRepository, PushSubscriptionRepository};
use prepper_entity::item::days_until;
use prepper_entity::push::{PushMessage, PushSubscription};

use super::aggregator::{LOOKAHEAD_DAYS, group_by_member, threshold_message};
use crate::push::PushSender;

/// Outcome of one notification run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSummary {
    pub items_checked: usize,
    pub notifications_sent: usize,
    pub subscriptions_removed: usize,
}

/// Finds expiring items and pushes alerts to every member of their stash.
///
/// Runs are not de-duplicated: triggering twice on the same day notifies
/// twice.
#[derive(Debug, Clone)]
pub struct ExpirationNotifier {
    items: Arc<ItemRepository>,
    members: Arc<MemberRepository>,
    subscriptions: Arc<PushSubscriptionRepository>,
    sender: Arc<dyn PushSender>,
}

impl ExpirationNotifier {
    /// Creates a new notifier.
    pub fn new(
        items: Arc<ItemRepository>,
        members: Arc<MemberRepository>,
        subscriptions: Arc<PushSubscriptionRepository>,
        sender: Arc<dyn PushSender>,
    ) -> Self {
        Self {
            items,
            members,
            subscriptions,
            sender,
        }
    }

    /// Daily digest: at most one message per bucket per member.
    pub async fn run_digest(&self, now: DateTime<Utc>) -> Result<NotificationSummary, AppError> {
        let items = self
            .items
            .find_expiring_before(now + Duration::days(LOOKAHEAD_DAYS))
            .await?;
        let mut summary = NotificationSummary {
            items_checked: items.len(),
            ..Default::default()
        };
        if items.is_empty() {
            return Ok(summary);
        }

        let stash_ids = distinct(items.iter().map(|i| i.stash_id));
        let memberships = self.members.user_ids_by_stash(&stash_ids).await?;
        let grouped = group_by_member(&items, &memberships, now);

        let user_ids: Vec<Uuid> = grouped.keys().copied().collect();
        let subscriptions = self.subscriptions_by_user(&user_ids).await?;

        for (user_id, buckets) in &grouped {
            let Some(subs) = subscriptions.get(user_id) else {
                continue;
            };
            let messages = buckets.messages();
            for sub in subs {
                let (sent, gone) = self.deliver(sub, &messages).await;
                summary.notifications_sent += sent;
                if gone {
                    summary.subscriptions_removed += 1;
                }
            }
        }

        info!(
            items_checked = summary.items_checked,
            notifications_sent = summary.notifications_sent,
            subscriptions_removed = summary.subscriptions_removed,
            "Expiration digest finished"
        );
        Ok(summary)
    }

    /// Per-item alerts on the 7, 3, 1 and 0 day marks.
    pub async fn run_threshold_alerts(
        &self,
        now: DateTime<Utc>,
    ) -> Result<NotificationSummary, AppError> {
        let items = self
            .items
            .find_expiring_before(now + Duration::days(LOOKAHEAD_DAYS))
            .await?;
        let mut summary = NotificationSummary {
            items_checked: items.len(),
            ..Default::default()
        };

        let alerts: Vec<(Uuid, PushMessage)> = items
            .iter()
            .filter_map(|item| {
                let days = days_until(item.expiration_date?, now);
                threshold_message(item, days).map(|m| (item.stash_id, m))
            })
            .collect();
        if alerts.is_empty() {
            return Ok(summary);
        }

        let stash_ids = distinct(alerts.iter().map(|(stash_id, _)| *stash_id));
        let memberships = self.members.user_ids_by_stash(&stash_ids).await?;
        let mut members_by_stash: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for (stash_id, user_id) in &memberships {
            members_by_stash.entry(*stash_id).or_default().push(*user_id);
        }
        let user_ids = distinct(memberships.iter().map(|(_, user_id)| *user_id));
        let subscriptions = self.subscriptions_by_user(&user_ids).await?;

        let mut removed: HashSet<Uuid> = HashSet::new();
        for (stash_id, message) in &alerts {
            for user_id in members_by_stash.get(stash_id).into_iter().flatten() {
                for sub in subscriptions.get(user_id).into_iter().flatten() {
                    if removed.contains(&sub.id) {
                        continue;
                    }
                    let (sent, gone) = self.deliver(sub, std::slice::from_ref(message)).await;
                    summary.notifications_sent += sent;
                    if gone {
                        removed.insert(sub.id);
                    }
                }
            }
        }
        summary.subscriptions_removed = removed.len();

        info!(
            items_checked = summary.items_checked,
            notifications_sent = summary.notifications_sent,
            subscriptions_removed = summary.subscriptions_removed,
            "Expiration alerts finished"
        );
        Ok(summary)
    }

    /// Send messages in order to one subscription.
    ///
    /// Returns the number delivered and whether the subscription turned out
    /// to be gone, in which case it is deleted and nothing more is sent.
    pub async fn deliver(&self, sub: &PushSubscription, messages: &[PushMessage]) -> (usize, bool) {
        deliver_to(self.sender.as_ref(), &self.subscriptions, sub, messages).await
    }

    async fn subscriptions_by_user(
        &self,
        user_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<PushSubscription>>, AppError> {
        let mut by_user: HashMap<Uuid, Vec<PushSubscription>> = HashMap::new();
        if user_ids.is_empty() {
            return Ok(by_user);
        }
        for sub in self.subscriptions.find_by_users(user_ids).await? {
            by_user.entry(sub.user_id).or_default().push(sub);
        }
        Ok(by_user)
    }
}

/// Shared delivery loop used by the notifier and the test endpoint.
pub(crate) async fn deliver_to(
    sender: &dyn PushSender,
    subscriptions: &PushSubscriptionRepository,
    sub: &PushSubscription,
    messages: &[PushMessage],
) -> (usize, bool) {
    let mut sent = 0;
    for message in messages {
        match sender.send(sub, message).await {
            Ok(()) => sent += 1,
            Err(e) if e.is_gone() => {
                info!(subscription_id = %sub.id, user_id = %sub.user_id, "Removing expired push subscription");
                if let Err(db) = subscriptions.delete(sub.id).await {
                    warn!(subscription_id = %sub.id, error = %db, "Failed to delete push subscription");
                }
                return (sent, true);
            }
            Err(e) => {
                warn!(subscription_id = %sub.id, error = %e, "Push delivery failed");
            }
        }
    }
    (sent, false)
}

fn distinct(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let set: HashSet<Uuid> = ids.collect();
    set.into_iter().collect()
}
