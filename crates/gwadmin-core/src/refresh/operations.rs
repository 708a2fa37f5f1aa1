use std::fmt::Display;

use chrono::TimeDelta;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::clock::Clock;
use super::types::{RefreshOutcome, RefreshPolicy, RefreshRecord};
use crate::store::ConfigStore;

/// Run `operation` only if `record` is stale.
///
/// The operation runs when the record was never checked or when strictly
/// more than `record.interval` has passed. On success its value replaces
/// `cached_result`. A failure is reported through the returned outcome and
/// never propagated; the cached result is left as it was, and
/// `policy.advance_timestamp_on_failure` decides whether the timestamp moves.
pub fn ensure_fresh<F, E>(
    record: &mut RefreshRecord,
    clock: &dyn Clock,
    policy: RefreshPolicy,
    operation: F,
) -> RefreshOutcome
where
    F: FnOnce() -> Result<Value, E>,
    E: Display,
{
    let now = clock.now();

    if record.is_fresh(now) {
        debug!(
            event = "core.refresh.skipped",
            age_ms = record.age(now).map(|age| age.num_milliseconds()),
            interval_ms = record.interval.num_milliseconds()
        );
        return RefreshOutcome::Skipped;
    }

    match operation() {
        Ok(result) => {
            record.cached_result = Some(result);
            record.last_checked_at = Some(now);
            info!(event = "core.refresh.completed", checked_at = %now);
            RefreshOutcome::Refreshed
        }
        Err(e) => {
            if policy.advance_timestamp_on_failure {
                record.last_checked_at = Some(now);
            }
            warn!(
                event = "core.refresh.failed",
                error = %e,
                timestamp_advanced = policy.advance_timestamp_on_failure
            );
            RefreshOutcome::Failed {
                message: e.to_string(),
            }
        }
    }
}

/// Gate an operation whose result is cached in the store under `key`.
///
/// Loads the record from `key` / `<key>_LAST_CHECK`, applies
/// [`ensure_fresh`], and writes the record back when the operation ran.
pub fn ensure_fresh_in_store<F, E>(
    store: &mut ConfigStore,
    key: &str,
    interval: TimeDelta,
    clock: &dyn Clock,
    policy: RefreshPolicy,
    operation: F,
) -> RefreshOutcome
where
    F: FnOnce() -> Result<Value, E>,
    E: Display,
{
    let mut record = RefreshRecord::load(store, key, interval);
    let outcome = ensure_fresh(&mut record, clock, policy, operation);
    if outcome.ran() {
        record.store_into(store, key);
    }
    outcome
}
