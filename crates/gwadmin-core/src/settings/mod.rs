//! # Console Settings
//!
//! Hierarchical TOML settings for the console itself. See [`loading`] for
//! the file hierarchy and [`types`] for the available keys.
//!
//! ```rust,no_run
//! use gwadmin_core::settings;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = settings::load_hierarchy()?;
//!     println!("variables file: {}", settings.variables_file().display());
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod errors;
pub mod loading;
pub mod types;
pub mod validation;

pub use errors::SettingsError;
pub use loading::{load_from_paths, load_hierarchy, load_settings_file, merge_settings};
pub use types::{AppSettings, ConsoleSettings, RefreshSettings};
pub use validation::validate_settings;
