//! gwadmin-core: Core library for the groupware server operator console
//!
//! Holds the console's process-wide state and the plumbing every menu
//! action shares. Used by the `gwadmin` CLI.
//!
//! # Main Entry Points
//!
//! - [`store`] - Variables store backed by a JSON file
//! - [`refresh`] - Staleness-gated refresh of expensive status checks
//! - [`exec`] - Running external administrative commands
//! - [`updates`] - Update-availability summary
//! - [`services`] - Status and restart of the stack's systemd units
//! - [`settings`] - Settings for the console itself

pub mod errors;
pub mod events;
pub mod exec;
pub mod logging;
pub mod refresh;
pub mod services;
pub mod settings;
pub mod store;
pub mod system;
pub mod updates;

// Re-export commonly used types at crate root for convenience
pub use errors::{ConsoleError, ConsoleResult};
pub use exec::{CommandRunner, SystemCommandRunner};
pub use refresh::{Clock, RefreshOutcome, RefreshPolicy, RefreshRecord, SystemClock};
pub use settings::ConsoleSettings;
pub use store::{ConfigStore, MissingFilePolicy, StoreError};
pub use updates::UpdateSummary;

// Re-export logging initialization
pub use logging::{LogLevel, init_logging};
