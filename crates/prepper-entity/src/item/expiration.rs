//! Expiration status of an item relative to "now".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Days from `now` until `expiration`, rounded up.
///
/// An expiration earlier today yields `0`, yesterday yields `-1`.
pub fn days_until(expiration: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (expiration - now).num_milliseconds();
    if millis > 0 {
        (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
    } else {
        // truncation toward zero is the ceiling for negatives
        millis / MILLIS_PER_DAY
    }
}

/// How urgently an item needs attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpirationStatus {
    /// More than a week left, or no expiration date.
    Safe,
    /// Four to seven days left.
    Warning,
    /// Zero to three days left.
    Danger,
    /// Past its expiration date.
    Expired,
}

impl ExpirationStatus {
    /// Classify an optional expiration date.
    pub fn classify(expiration: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let Some(expiration) = expiration else {
            return Self::Safe;
        };
        match days_until(expiration, now) {
            d if d < 0 => Self::Expired,
            d if d <= 3 => Self::Danger,
            d if d <= 7 => Self::Warning,
            _ => Self::Safe,
        }
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Expired => "expired",
        }
    }
}

impl std::fmt::Display for ExpirationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    fn midnight(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_no_date_is_safe() {
        assert_eq!(ExpirationStatus::classify(None, noon()), ExpirationStatus::Safe);
    }

    #[test]
    fn test_exact_day_boundaries() {
        let now = noon();
        let at = |days| Some(now + Duration::days(days));
        assert_eq!(ExpirationStatus::classify(at(3), now), ExpirationStatus::Danger);
        assert_eq!(ExpirationStatus::classify(at(4), now), ExpirationStatus::Warning);
        assert_eq!(ExpirationStatus::classify(at(7), now), ExpirationStatus::Warning);
        assert_eq!(ExpirationStatus::classify(at(8), now), ExpirationStatus::Safe);
        assert_eq!(ExpirationStatus::classify(at(365), now), ExpirationStatus::Safe);
    }

    #[test]
    fn test_partial_days_round_up() {
        let now = noon();
        let seven_and_a_bit = now + Duration::days(7) + Duration::minutes(1);
        assert_eq!(days_until(seven_and_a_bit, now), 8);
        assert_eq!(ExpirationStatus::classify(Some(seven_and_a_bit), now), ExpirationStatus::Safe);
        assert_eq!(days_until(now + Duration::hours(1), now), 1);
    }

    #[test]
    fn test_today_is_danger_and_yesterday_expired() {
        let now = noon();
        assert_eq!(days_until(midnight(10), now), 0);
        assert_eq!(ExpirationStatus::classify(Some(midnight(10)), now), ExpirationStatus::Danger);
        assert_eq!(days_until(midnight(9), now), -1);
        assert_eq!(ExpirationStatus::classify(Some(midnight(9)), now), ExpirationStatus::Expired);
    }

    #[test]
    fn test_far_past_is_expired() {
        let now = noon();
        let past = now - Duration::days(400);
        assert_eq!(ExpirationStatus::classify(Some(past), now), ExpirationStatus::Expired);
    }
}
