//! # Variables Store
//!
//! Process-wide key/value state backed by a JSON file (`./variables.json`
//! by default). Loaded once at startup, mutated in memory by menu actions,
//! and written back only when explicitly saved.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use gwadmin_core::store::{self, MissingFilePolicy};
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let path = Path::new("./variables.json");
//!     let mut loaded = store::open_with_policy(path, MissingFilePolicy::StartEmpty)?;
//!     loaded.store.set("DISTRO", "22.04");
//!     store::save(&loaded.store, path)?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod persistence;
pub mod types;

pub use errors::StoreError;
pub use persistence::{
    DEFAULT_VARIABLES_FILE, LoadedStore, MissingFilePolicy, VARIABLES_FILE_ENV, load,
    open_with_policy, resolve_variables_path, save,
};
pub use types::ConfigStore;
