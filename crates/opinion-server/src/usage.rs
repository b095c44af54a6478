//! Daily Usage Tracking
//!
//! Per-client request counters that reset when the calendar day changes.
//! Backs the optional daily quota, the `/check-update` refresh and the admin
//! stats endpoint.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{NaiveDate, Utc};
use serde::Serialize;

/// Whether a request may proceed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    /// `remaining` is `None` when no quota is configured
    Allowed { remaining: Option<u32> },
    Blocked,
}

/// Today's counters, as reported by `/admin/stats`
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    pub date: NaiveDate,
    pub requests: u64,
    pub blocked: u64,
    pub unique_callers: usize,
}

#[derive(Debug)]
struct DailyUsage {
    date: NaiveDate,
    per_client: HashMap<String, u32>,
    requests: u64,
    blocked: u64,
}

impl DailyUsage {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            per_client: HashMap::new(),
            requests: 0,
            blocked: 0,
        }
    }

    /// Reset if `today` is a new day; true when a reset happened
    fn roll(&mut self, today: NaiveDate) -> bool {
        if self.date == today {
            return false;
        }
        *self = Self::new(today);
        true
    }
}

pub struct UsageTracker {
    limit: Option<u32>,
    inner: Mutex<DailyUsage>,
}

impl UsageTracker {
    pub fn new(limit: Option<u32>) -> Self {
        Self::starting_on(limit, Utc::now().date_naive())
    }

    pub fn starting_on(limit: Option<u32>, date: NaiveDate) -> Self {
        Self {
            limit,
            inner: Mutex::new(DailyUsage::new(date)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DailyUsage> {
        // Counters stay usable even if a holder panicked
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count one request from `client` against the current day.
    /// Day changes go through [`UsageTracker::refresh_at`] first.
    pub fn record(&self, client: &str) -> Admission {
        let mut usage = self.lock();
        let used = usage.per_client.get(client).copied().unwrap_or(0);

        if let Some(limit) = self.limit {
            if used >= limit {
                usage.blocked += 1;
                tracing::warn!(client, limit, "Daily request limit reached");
                return Admission::Blocked;
            }
        }

        usage.per_client.insert(client.to_string(), used + 1);
        usage.requests += 1;

        Admission::Allowed {
            remaining: self.limit.map(|limit| limit - (used + 1)),
        }
    }

    /// Roll the counters over if the day changed
    pub fn refresh_at(&self, today: NaiveDate) -> bool {
        let rolled = self.lock().roll(today);
        if rolled {
            tracing::info!(%today, "Daily usage counters reset");
        }
        rolled
    }

    pub fn snapshot(&self) -> UsageSnapshot {
        let usage = self.lock();
        UsageSnapshot {
            date: usage.date,
            requests: usage.requests,
            blocked: usage.blocked,
            unique_callers: usage.per_client.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_unlimited() {
        let tracker = UsageTracker::starting_on(None, day(1));
        for _ in 0..50 {
            assert_eq!(
                tracker.record("a"),
                Admission::Allowed { remaining: None }
            );
        }
        assert_eq!(tracker.snapshot().requests, 50);
    }

    #[test]
    fn test_limit_blocks_per_client() {
        let tracker = UsageTracker::starting_on(Some(2), day(1));

        assert_eq!(
            tracker.record("a"),
            Admission::Allowed { remaining: Some(1) }
        );
        assert_eq!(
            tracker.record("a"),
            Admission::Allowed { remaining: Some(0) }
        );
        assert_eq!(tracker.record("a"), Admission::Blocked);

        // Other callers have their own allowance
        assert!(matches!(
            tracker.record("b"),
            Admission::Allowed { .. }
        ));

        let snap = tracker.snapshot();
        assert_eq!(snap.requests, 3);
        assert_eq!(snap.blocked, 1);
        assert_eq!(snap.unique_callers, 2);
    }

    #[test]
    fn test_new_day_resets() {
        let tracker = UsageTracker::starting_on(Some(1), day(1));
        tracker.record("a");
        assert_eq!(tracker.record("a"), Admission::Blocked);

        // Counting alone never rolls the day over
        assert_eq!(tracker.record("a"), Admission::Blocked);

        assert!(tracker.refresh_at(day(2)));
        assert!(matches!(tracker.record("a"), Admission::Allowed { .. }));
        assert_eq!(tracker.snapshot().date, day(2));
    }

    #[test]
    fn test_refresh_is_idempotent() {
        let tracker = UsageTracker::starting_on(None, day(1));
        tracker.record("a");

        assert!(!tracker.refresh_at(day(1)));
        assert_eq!(tracker.snapshot().requests, 1);

        assert!(tracker.refresh_at(day(2)));
        assert!(!tracker.refresh_at(day(2)));
        assert_eq!(tracker.snapshot().requests, 0);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let tracker = UsageTracker::starting_on(None, day(3));
        let json = serde_json::to_value(tracker.snapshot()).unwrap();
        assert_eq!(json["date"], "2025-01-03");
        assert_eq!(json["uniqueCallers"], 0);
    }
}
