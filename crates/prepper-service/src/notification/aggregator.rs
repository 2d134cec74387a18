//! Grouping of expiring items into per-member push messages.
//!
//! Everything here is pure: callers load items and memberships, and get
//! back the messages to deliver.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use prepper_entity::item::{Item, days_until};
use prepper_entity::push::PushMessage;

/// How far ahead the daily digest looks.
pub const LOOKAHEAD_DAYS: i64 = 7;

/// Title of every digest message.
pub const ALERT_TITLE: &str = "Udløbsadvarsel";

/// Day counts on which the per-item alert fires.
pub const ALERT_THRESHOLDS: [i64; 4] = [7, 3, 1, 0];

/// Which digest message an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Expired,
    Tomorrow,
    Soon,
}

impl Bucket {
    /// Bucket for an item `days` away from expiring.
    pub fn for_days(days: i64) -> Self {
        match days {
            d if d <= 0 => Self::Expired,
            1 => Self::Tomorrow,
            _ => Self::Soon,
        }
    }

    fn message(self, names: &[String]) -> PushMessage {
        let body = match (self, names) {
            (Self::Expired, [one]) => format!("{one} er udløbet"),
            (Self::Expired, many) => format!("{} varer er udløbet", many.len()),
            (Self::Tomorrow, [one]) => format!("{one} udløber i morgen"),
            (Self::Tomorrow, many) => format!("{} varer udløber i morgen", many.len()),
            (Self::Soon, [one]) => format!("{one} udløber snart"),
            (Self::Soon, many) => format!("{} varer udløber snart", many.len()),
        };
        let (url, tag, require_interaction) = match self {
            Self::Expired => ("/inventory?expiration=expired", "expired-items", true),
            Self::Tomorrow => ("/inventory?expiration=soon", "expiring-tomorrow", true),
            Self::Soon => ("/inventory?expiration=soon", "expiring-soon", false),
        };

        PushMessage {
            title: ALERT_TITLE.to_string(),
            body,
            url: Some(url.to_string()),
            tag: Some(tag.to_string()),
            require_interaction,
        }
    }
}

/// Item names of one member, split by bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    pub expired: Vec<String>,
    pub tomorrow: Vec<String>,
    pub soon: Vec<String>,
}

impl Buckets {
    /// Add an item name to the bucket for `days`.
    pub fn push(&mut self, days: i64, name: &str) {
        let list = match Bucket::for_days(days) {
            Bucket::Expired => &mut self.expired,
            Bucket::Tomorrow => &mut self.tomorrow,
            Bucket::Soon => &mut self.soon,
        };
        list.push(name.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.expired.is_empty() && self.tomorrow.is_empty() && self.soon.is_empty()
    }

    /// One message per non-empty bucket: expired, tomorrow, soon.
    pub fn messages(&self) -> Vec<PushMessage> {
        [
            (Bucket::Expired, &self.expired),
            (Bucket::Tomorrow, &self.tomorrow),
            (Bucket::Soon, &self.soon),
        ]
        .into_iter()
        .filter(|(_, names)| !names.is_empty())
        .map(|(bucket, names)| bucket.message(names))
        .collect()
    }
}

/// Bucket every dated item for every member of its stash.
///
/// `memberships` holds `(stash_id, user_id)` pairs.
pub fn group_by_member(
    items: &[Item],
    memberships: &[(Uuid, Uuid)],
    now: DateTime<Utc>,
) -> HashMap<Uuid, Buckets> {
    let mut members_by_stash: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for (stash_id, user_id) in memberships {
        members_by_stash.entry(*stash_id).or_default().push(*user_id);
    }

    let mut grouped: HashMap<Uuid, Buckets> = HashMap::new();
    for item in items {
        let Some(expiration) = item.expiration_date else {
            continue;
        };
        let days = days_until(expiration, now);
        for user_id in members_by_stash.get(&item.stash_id).into_iter().flatten() {
            grouped.entry(*user_id).or_default().push(days, &item.name);
        }
    }
    grouped
}

/// The per-item alert, if `days` is one of [`ALERT_THRESHOLDS`].
pub fn threshold_message(item: &Item, days: i64) -> Option<PushMessage> {
    if !ALERT_THRESHOLDS.contains(&days) {
        return None;
    }

    let body = match days {
        d if d <= 0 => format!("{} has expired!", item.name),
        1 => format!("{} expires tomorrow!", item.name),
        d => format!("{} expires in {d} days", item.name),
    };

    Some(PushMessage {
        title: "Expiration Alert".to_string(),
        body,
        url: Some("/expiring".to_string()),
        tag: Some(format!("expiring-{}-{days}", item.id)),
        require_interaction: days <= 1,
    })
}

/// Message for the "send a test notification" button.
///
/// Summarizes the caller's expired or soon-expiring items when there are
/// any, otherwise confirms that notifications work.
pub fn test_message(items: &[Item], now: DateTime<Utc>) -> PushMessage {
    let mut expired = Vec::new();
    let mut soon = Vec::new();
    for item in items {
        let Some(expiration) = item.expiration_date else {
            continue;
        };
        match days_until(expiration, now) {
            d if d <= 0 => expired.push(item.name.as_str()),
            d if d <= LOOKAHEAD_DAYS => soon.push(item.name.as_str()),
            _ => {}
        }
    }

    let (title, body, url) = match (expired.as_slice(), soon.as_slice()) {
        ([one], _) => (ALERT_TITLE, format!("{one} er udløbet"), "/inventory?expiration=expired"),
        (many, _) if !many.is_empty() => (
            ALERT_TITLE,
            format!("{} varer er udløbet", many.len()),
            "/inventory?expiration=expired",
        ),
        (_, [one]) => (ALERT_TITLE, format!("{one} udløber snart"), "/inventory?expiration=soon"),
        (_, many) if !many.is_empty() => (
            ALERT_TITLE,
            format!("{} varer udløber snart", many.len()),
            "/inventory?expiration=soon",
        ),
        _ => ("Test", "Notifikationer virker".to_string(), "/"),
    };

    PushMessage {
        title: title.to_string(),
        body,
        url: Some(url.to_string()),
        tag: Some("test-notification".to_string()),
        require_interaction: false,
    }
}
