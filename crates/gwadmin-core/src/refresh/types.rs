use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde_json::Value;
use tracing::warn;

use crate::store::ConfigStore;

/// Suffix of the store key that holds a record's last-check timestamp.
pub const LAST_CHECK_SUFFIX: &str = "_LAST_CHECK";

/// Bookkeeping for one staleness-gated operation.
///
/// `cached_result` is only trusted while [`RefreshRecord::is_fresh`] holds.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshRecord {
    pub last_checked_at: Option<DateTime<Utc>>,
    pub cached_result: Option<Value>,
    pub interval: TimeDelta,
}

impl RefreshRecord {
    pub fn new(interval: TimeDelta) -> Self {
        Self {
            last_checked_at: None,
            cached_result: None,
            interval,
        }
    }

    /// Time since the last check, if there was one.
    pub fn age(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.last_checked_at.map(|last| now - last)
    }

    /// True when a check happened and no more than `interval` has passed.
    ///
    /// Exactly `interval` still counts as fresh. A check stamped in the
    /// future (clock set back, hand-edited file) counts as stale.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.age(now)
            .is_some_and(|age| age >= TimeDelta::zero() && age <= self.interval)
    }

    /// Build the record for `key` from the values cached in the store.
    ///
    /// A missing or unparseable timestamp leaves the record unchecked, which
    /// forces the next gate to run the operation.
    pub fn load(store: &ConfigStore, key: &str, interval: TimeDelta) -> Self {
        let stamp_key = last_check_key(key);
        let last_checked_at = store.get(&stamp_key).and_then(|value| {
            let parsed = value
                .as_str()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc));
            if parsed.is_none() {
                warn!(
                    event = "core.refresh.timestamp_invalid",
                    key = %stamp_key,
                    value = %value,
                    "Ignoring unreadable last-check timestamp"
                );
            }
            parsed
        });

        Self {
            last_checked_at,
            cached_result: store.get(key).cloned(),
            interval,
        }
    }

    /// Write the cached result and timestamp back into the store.
    ///
    /// Unset fields leave the corresponding keys alone.
    pub fn store_into(&self, store: &mut ConfigStore, key: &str) {
        if let Some(result) = &self.cached_result {
            store.set(key, result.clone());
        }
        if let Some(last) = self.last_checked_at {
            store.set(
                last_check_key(key),
                last.to_rfc3339_opts(SecondsFormat::Millis, true),
            );
        }
    }
}

pub fn last_check_key(key: &str) -> String {
    format!("{}{}", key, LAST_CHECK_SUFFIX)
}

/// How the gate treats a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    /// Move `last_checked_at` forward even when the operation fails, so a
    /// broken external command is not re-run on every menu render.
    pub advance_timestamp_on_failure: bool,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            advance_timestamp_on_failure: true,
        }
    }
}

/// What a call to the gate did.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// Cached result was still fresh; the operation did not run.
    Skipped,
    /// The operation ran and its result replaced the cache.
    Refreshed,
    /// The operation ran and failed; the cache kept its previous value.
    Failed { message: String },
}

impl RefreshOutcome {
    pub fn ran(&self) -> bool {
        !matches!(self, RefreshOutcome::Skipped)
    }
}
