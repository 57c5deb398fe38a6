//! Monthly quota decisions and usage statistics.

use super::ledger::{MonthKey, UsageLedger};
use crate::{Error, Result};
use serde::Serialize;

/// Default monthly character cap.
pub const DEFAULT_USAGE_LIMIT: u64 = 1_000_000;

/// Outcome of a quota check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitCheck {
    Allowed,
    Exceeded { current_usage: u64, limit: u64 },
}

impl LimitCheck {
    pub fn is_allowed(&self) -> bool {
        matches!(self, LimitCheck::Allowed)
    }

    pub fn into_result(self) -> Result<()> {
        match self {
            LimitCheck::Allowed => Ok(()),
            LimitCheck::Exceeded {
                current_usage,
                limit,
            } => Err(Error::UsageLimitExceeded {
                current_usage,
                limit,
            }),
        }
    }
}

/// Allowed iff `current_month_usage + pending <= limit`.
pub fn check_limit(pending: u64, current_month_usage: u64, limit: u64) -> LimitCheck {
    if current_month_usage.saturating_add(pending) <= limit {
        LimitCheck::Allowed
    } else {
        LimitCheck::Exceeded {
            current_usage: current_month_usage,
            limit,
        }
    }
}

/// Adds `characters` to `month` and returns the pruned ledger.
pub fn track_usage(mut ledger: UsageLedger, month: MonthKey, characters: u64) -> UsageLedger {
    ledger.record(month, characters);
    ledger
}

/// Snapshot of one month's usage against the limit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageStats {
    pub current_month: MonthKey,
    pub monthly_usage: u64,
    pub usage_limit: u64,
    /// 0–100 with one decimal; 0 when the limit is 0.
    pub usage_percent: f64,
    pub remaining: u64,
    pub limit_reached: bool,
}

pub fn get_stats(ledger: &UsageLedger, month: MonthKey, limit: u64) -> UsageStats {
    let monthly_usage = ledger.usage_for(month);
    let usage_percent = if limit > 0 {
        let pct = monthly_usage as f64 / limit as f64 * 100.0;
        ((pct * 10.0).round() / 10.0).min(100.0)
    } else {
        0.0
    };
    UsageStats {
        current_month: month,
        monthly_usage,
        usage_limit: limit,
        usage_percent,
        remaining: limit.saturating_sub(monthly_usage),
        limit_reached: monthly_usage >= limit,
    }
}

/// Applies a configured monthly limit to a ledger.
///
/// Holds no ledger itself; callers load the ledger, pass it in, and persist
/// whatever [`UsageTracker::track`] returns.
#[derive(Debug, Clone, Copy)]
pub struct UsageTracker {
    limit: u64,
}

impl UsageTracker {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn check(&self, ledger: &UsageLedger, month: MonthKey, pending: u64) -> LimitCheck {
        let decision = check_limit(pending, ledger.usage_for(month), self.limit);
        if let LimitCheck::Exceeded { current_usage, limit } = decision {
            tracing::warn!(
                month = %month,
                current_usage,
                pending,
                limit,
                "monthly character limit would be exceeded"
            );
        }
        decision
    }

    /// Like [`UsageTracker::check`] but as a `Result`.
    pub fn ensure_within_limit(
        &self,
        ledger: &UsageLedger,
        month: MonthKey,
        pending: u64,
    ) -> Result<()> {
        self.check(ledger, month, pending).into_result()
    }

    pub fn track(&self, ledger: UsageLedger, month: MonthKey, characters: u64) -> UsageLedger {
        track_usage(ledger, month, characters)
    }

    pub fn stats(&self, ledger: &UsageLedger, month: MonthKey) -> UsageStats {
        get_stats(ledger, month, self.limit)
    }
}

impl Default for UsageTracker {
    fn default() -> Self {
        Self::new(DEFAULT_USAGE_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::MAX_RETAINED_MONTHS;

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_check_limit_boundary_is_allowed() {
        assert_eq!(check_limit(100, 900, 1000), LimitCheck::Allowed);
        assert_eq!(
            check_limit(101, 900, 1000),
            LimitCheck::Exceeded {
                current_usage: 900,
                limit: 1000
            }
        );
    }

    #[test]
    fn test_check_limit_does_not_overflow() {
        assert!(!check_limit(u64::MAX, 1, u64::MAX - 1).is_allowed());
    }

    #[test]
    fn test_exceeded_converts_to_error() {
        let err = check_limit(10, 995, 1000).into_result().unwrap_err();
        assert!(matches!(
            err,
            Error::UsageLimitExceeded {
                current_usage: 995,
                limit: 1000
            }
        ));
    }

    #[test]
    fn test_thirteen_months_keep_most_recent_twelve() {
        let mut ledger = UsageLedger::new();
        let mut m = month("2024-01");
        for _ in 0..13 {
            ledger = track_usage(ledger, m, 10);
            m = m.next();
        }
        assert_eq!(ledger.len(), MAX_RETAINED_MONTHS);
        assert_eq!(ledger.usage_for(month("2024-01")), 0);
        let months: Vec<String> = ledger.months().map(|(k, _)| k.to_string()).collect();
        assert_eq!(months.first().map(String::as_str), Some("2024-02"));
        assert_eq!(months.last().map(String::as_str), Some("2025-01"));
    }

    #[test]
    fn test_eviction_ignores_insertion_order() {
        let mut ledger = UsageLedger::new();
        // newest first, then an older month pushes the count past the cap
        let mut m = month("2025-12");
        for _ in 0..12 {
            ledger = track_usage(ledger, m, 1);
            m = m.previous();
        }
        ledger = track_usage(ledger, month("2020-06"), 1);
        assert_eq!(ledger.len(), 12);
        assert_eq!(ledger.usage_for(month("2020-06")), 0);
        assert_eq!(ledger.usage_for(month("2025-01")), 1);
    }

    #[test]
    fn test_stats() {
        let ledger = track_usage(UsageLedger::new(), month("2025-05"), 1234);
        let stats = get_stats(&ledger, month("2025-05"), 10_000);
        assert_eq!(stats.monthly_usage, 1234);
        assert_eq!(stats.usage_percent, 12.3);
        assert_eq!(stats.remaining, 8766);
        assert!(!stats.limit_reached);
    }

    #[test]
    fn test_stats_caps_percent_and_floors_remaining() {
        let ledger = track_usage(UsageLedger::new(), month("2025-05"), 1500);
        let stats = get_stats(&ledger, month("2025-05"), 1000);
        assert_eq!(stats.usage_percent, 100.0);
        assert_eq!(stats.remaining, 0);
        assert!(stats.limit_reached);
    }

    #[test]
    fn test_stats_with_zero_limit() {
        let stats = get_stats(&UsageLedger::new(), month("2025-05"), 0);
        assert_eq!(stats.usage_percent, 0.0);
        assert!(stats.limit_reached);
    }

    #[test]
    fn test_tracker_uses_month_bucket() {
        let tracker = UsageTracker::new(100);
        let ledger = tracker.track(UsageLedger::new(), month("2025-04"), 90);
        assert!(tracker.check(&ledger, month("2025-04"), 10).is_allowed());
        assert!(!tracker.check(&ledger, month("2025-04"), 11).is_allowed());
        // a new month starts from zero
        assert!(tracker.check(&ledger, month("2025-05"), 100).is_allowed());
    }

    #[test]
    fn test_stats_serialize_month_as_key_string() {
        let stats = UsageTracker::new(10).stats(&UsageLedger::new(), month("2025-07"));
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["current_month"], "2025-07");
        assert_eq!(json["usage_limit"], 10);
    }
}
