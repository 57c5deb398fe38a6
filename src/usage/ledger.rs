//! Month keys and the month-keyed usage ledger.

use crate::{Error, ErrorContext, Result};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Number of months the ledger keeps.
pub const MAX_RETAINED_MONTHS: usize = 12;

/// A calendar month, rendered as `YYYY-MM`.
///
/// Ordering is chronological, which for four-digit years is also the
/// lexicographic order of the rendered keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (0..=9999).contains(&year) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The current month on the UTC calendar.
    pub fn current() -> Self {
        Self::from_date(&Utc::now())
    }

    pub fn from_date(date: &impl Datelike) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            Error::validation_with_context(
                format!("invalid month key '{}'", s),
                ErrorContext::new().with_details("expected YYYY-MM"),
            )
        };
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Characters synthesized per month.
///
/// Persisted as a JSON object, e.g. `{"2025-01": 1200, "2025-02": 830}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageLedger {
    months: BTreeMap<MonthKey, u64>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Usage recorded for `month`, zero when absent.
    pub fn usage_for(&self, month: MonthKey) -> u64 {
        self.months.get(&month).copied().unwrap_or(0)
    }

    /// Adds `characters` to the month's bucket, then evicts the oldest months
    /// until at most [`MAX_RETAINED_MONTHS`] remain.
    pub fn record(&mut self, month: MonthKey, characters: u64) {
        let bucket = self.months.entry(month).or_insert(0);
        *bucket = bucket.saturating_add(characters);
        while self.months.len() > MAX_RETAINED_MONTHS {
            if let Some((evicted, count)) = self.months.pop_first() {
                tracing::debug!(month = %evicted, characters = count, "evicted usage month");
            }
        }
    }

    /// Months present, oldest first.
    pub fn months(&self) -> impl Iterator<Item = (MonthKey, u64)> + '_ {
        self.months.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_month_key_parse_and_display() {
        let key = month("2025-03");
        assert_eq!(key.year(), 2025);
        assert_eq!(key.month(), 3);
        assert_eq!(key.to_string(), "2025-03");
    }

    #[test]
    fn test_month_key_rejects_malformed() {
        for bad in ["2025-13", "2025-00", "25-01", "2025-1", "2025/01", "abcd-ef", ""] {
            assert!(bad.parse::<MonthKey>().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_month_key_next_and_previous_wrap_years() {
        assert_eq!(month("2024-12").next(), month("2025-01"));
        assert_eq!(month("2025-01").previous(), month("2024-12"));
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(month("2024-12") < month("2025-01"));
        assert!(month("2025-02") < month("2025-10"));
    }

    #[test]
    fn test_record_accumulates() {
        let mut ledger = UsageLedger::new();
        ledger.record(month("2025-01"), 100);
        ledger.record(month("2025-01"), 50);
        assert_eq!(ledger.usage_for(month("2025-01")), 150);
        assert_eq!(ledger.usage_for(month("2025-02")), 0);
    }

    #[test]
    fn test_json_shape() {
        let mut ledger = UsageLedger::new();
        ledger.record(month("2025-02"), 7);
        ledger.record(month("2024-11"), 3);
        assert_eq!(ledger.to_json().unwrap(), r#"{"2024-11":3,"2025-02":7}"#);
        let back = UsageLedger::from_json(r#"{"2025-02":7,"2024-11":3}"#).unwrap();
        assert_eq!(back, ledger);
    }

    #[test]
    fn test_json_rejects_bad_keys() {
        assert!(UsageLedger::from_json(r#"{"January":7}"#).is_err());
    }
}
