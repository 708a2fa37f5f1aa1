//! Settings loading and merging logic.
//!
//! Settings are loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User settings** - `~/.gwadmin/config.toml`
//! 3. **Project settings** - `./.gwadmin/config.toml`
//! 4. **CLI arguments** - Command-line flags (highest priority)

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::errors::SettingsError;
use super::types::{AppSettings, ConsoleSettings, RefreshSettings};
use super::validation::validate_settings;

const SETTINGS_DIR: &str = ".gwadmin";
const SETTINGS_FILE: &str = "config.toml";

/// Load settings from the user and project settings files.
///
/// # Errors
///
/// Returns an error if a file exists but cannot be read or parsed, or if the
/// merged settings fail validation. Missing files are not errors.
pub fn load_hierarchy() -> Result<ConsoleSettings, SettingsError> {
    let mut paths = Vec::new();
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(SETTINGS_DIR).join(SETTINGS_FILE));
    }
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(SETTINGS_DIR).join(SETTINGS_FILE));
    }
    load_from_paths(&paths)
}

/// Load and merge settings files in order; later files win.
pub fn load_from_paths(paths: &[PathBuf]) -> Result<ConsoleSettings, SettingsError> {
    let mut settings = ConsoleSettings::default();

    for path in paths {
        if let Some(file_settings) = load_settings_file(path)? {
            settings = merge_settings(settings, file_settings);
        }
    }

    validate_settings(&settings)?;

    Ok(settings)
}

/// Load a single settings file. `Ok(None)` when it does not exist.
pub fn load_settings_file(path: &Path) -> Result<Option<ConsoleSettings>, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(event = "core.settings.file_absent", path = %path.display());
            return Ok(None);
        }
        Err(e) => {
            return Err(SettingsError::IoError {
                path: path.display().to_string(),
                source: e,
            });
        }
    };

    let settings = toml::from_str(&content).map_err(|e| SettingsError::ParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    debug!(event = "core.settings.file_loaded", path = %path.display());

    Ok(Some(settings))
}

/// Merge two settings, with `override_settings` taking precedence.
///
/// Optional fields are replaced only when the override sets them. Service
/// unit maps are merged entry by entry.
pub fn merge_settings(
    base: ConsoleSettings,
    override_settings: ConsoleSettings,
) -> ConsoleSettings {
    ConsoleSettings {
        variables_file: override_settings.variables_file.or(base.variables_file),
        refresh: RefreshSettings {
            update_interval_secs: override_settings
                .refresh
                .update_interval_secs
                .or(base.refresh.update_interval_secs),
            advance_timestamp_on_failure: override_settings
                .refresh
                .advance_timestamp_on_failure
                .or(base.refresh.advance_timestamp_on_failure),
        },
        app: AppSettings {
            occ_path: override_settings.app.occ_path.or(base.app.occ_path),
            web_user: override_settings.app.web_user.or(base.app.web_user),
        },
        services: {
            let mut merged = base.services;
            merged.extend(override_settings.services);
            merged
        },
    }
}
