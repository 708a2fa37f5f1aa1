//! Update-availability summary.
//!
//! The one status check wrapped by the staleness gate: it shells out to the
//! package manager and the application CLI, both slow enough that re-running
//! them on every menu render would be noticeable.

pub mod errors;
pub mod operations;
pub mod parsing;
pub mod types;

pub use errors::UpdateError;
pub use operations::{
    UPDATE_SUMMARY_KEY, cached_summary, check_updates, compute_update_summary, occ_command,
};
pub use types::{AppComponentUpdate, AppUpdate, PackageUpdate, UpdateSummary};
