//! Monthly character-usage accounting.
//!
//! The functions here are pure: they take a [`UsageLedger`] and return a decision
//! or a new ledger. Loading and persisting the ledger is the caller's job (see
//! [`AudioGenerator`](crate::generator::AudioGenerator)).
//!
//! ```rust
//! use post_tts::usage::{check_limit, track_usage, LimitCheck, MonthKey, UsageLedger};
//!
//! let month: MonthKey = "2025-03".parse().unwrap();
//! let ledger = track_usage(UsageLedger::new(), month, 900);
//! assert_eq!(check_limit(100, ledger.usage_for(month), 1000), LimitCheck::Allowed);
//! ```

mod ledger;
mod tracker;

pub use ledger::{MonthKey, UsageLedger, MAX_RETAINED_MONTHS};
pub use tracker::{
    check_limit, get_stats, track_usage, LimitCheck, UsageStats, UsageTracker,
    DEFAULT_USAGE_LIMIT,
};
