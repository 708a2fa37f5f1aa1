//! # Staleness-Gated Refresh
//!
//! Re-runs an expensive status check only when its cached result has
//! gone stale. Results and timestamps are cached in the [`ConfigStore`]
//! so they survive between menu renders (and across sessions once saved).
//!
//! [`ConfigStore`]: crate::store::ConfigStore

pub mod clock;
pub mod operations;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use operations::{ensure_fresh, ensure_fresh_in_store};
pub use types::{LAST_CHECK_SUFFIX, RefreshOutcome, RefreshPolicy, RefreshRecord, last_check_key};
