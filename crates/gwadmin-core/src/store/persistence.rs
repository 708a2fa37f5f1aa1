use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{error, info, warn};

use super::errors::StoreError;
use super::types::ConfigStore;
use crate::errors::ConsoleError;

/// Default location of the variables file, relative to the working directory.
pub const DEFAULT_VARIABLES_FILE: &str = "./variables.json";

/// Environment variable that overrides the variables file location.
pub const VARIABLES_FILE_ENV: &str = "GWADMIN_VARIABLES_FILE";

/// What a caller does when the variables file cannot be loaded.
///
/// The store itself never decides this; each call site picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingFilePolicy {
    /// Log the problem and continue with an empty store.
    StartEmpty,
    /// Hand the error back so the caller can terminate.
    Terminate,
}

/// Result of [`open_with_policy`].
///
/// `load_error` is set when the store fell back to empty, so the menu can
/// tell the operator why nothing was loaded.
#[derive(Debug, Default)]
pub struct LoadedStore {
    pub store: ConfigStore,
    pub load_error: Option<StoreError>,
}

/// Read and parse the variables file at `path`.
pub fn load(path: &Path) -> Result<ConfigStore, StoreError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StoreError::ConfigFileMissing {
                path: path.display().to_string(),
            }
        } else {
            StoreError::ConfigReadError {
                path: path.display().to_string(),
                source: e,
            }
        }
    })?;

    let value: Value =
        serde_json::from_str(&content).map_err(|e| StoreError::ConfigParseError {
            path: path.display().to_string(),
            source: e,
        })?;

    let Value::Object(map) = value else {
        return Err(StoreError::ConfigNotAnObject {
            path: path.display().to_string(),
        });
    };

    let store: ConfigStore = map.into_iter().collect();

    info!(
        event = "core.store.loaded",
        path = %path.display(),
        count = store.len()
    );

    Ok(store)
}

/// Serialize the whole store and replace the file at `path`.
///
/// The JSON is written to a temporary file next to the target and renamed
/// over it, so a failed write never leaves a truncated variables file.
/// The in-memory store is untouched whether or not this succeeds.
pub fn save(store: &ConfigStore, path: &Path) -> Result<(), StoreError> {
    let write_error = |message: String| StoreError::ConfigWriteError {
        path: path.display().to_string(),
        message,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    std::fs::create_dir_all(&parent).map_err(|e| {
        write_error(format!(
            "Failed to create directory ({}): {}",
            parent.display(),
            e
        ))
    })?;

    let json = serde_json::to_string_pretty(store)
        .map_err(|e| write_error(format!("Failed to serialize variables: {}", e)))?;

    let mut tmp = tempfile::NamedTempFile::new_in(&parent)
        .map_err(|e| write_error(format!("Failed to create temporary file: {}", e)))?;
    tmp.write_all(json.as_bytes())
        .and_then(|()| tmp.write_all(b"\n"))
        .map_err(|e| write_error(e.to_string()))?;
    tmp.persist(path)
        .map_err(|e| write_error(e.error.to_string()))?;

    info!(
        event = "core.store.saved",
        path = %path.display(),
        count = store.len()
    );

    Ok(())
}

/// Load the store, applying the caller's policy for load failures.
pub fn open_with_policy(
    path: &Path,
    policy: MissingFilePolicy,
) -> Result<LoadedStore, StoreError> {
    match load(path) {
        Ok(store) => Ok(LoadedStore {
            store,
            load_error: None,
        }),
        Err(e) => match policy {
            MissingFilePolicy::Terminate => {
                error!(
                    event = "core.store.load_fatal",
                    path = %path.display(),
                    error_code = e.error_code(),
                    error = %e
                );
                Err(e)
            }
            MissingFilePolicy::StartEmpty => {
                // WARN (not error): an absent file is normal on a fresh install.
                if matches!(e, StoreError::ConfigFileMissing { .. }) {
                    warn!(
                        event = "core.store.file_missing",
                        path = %path.display(),
                        "Variables file not found - starting with an empty store"
                    );
                } else {
                    // ERROR: file exists but is unusable, its contents are not in memory.
                    error!(
                        event = "core.store.load_failed",
                        path = %path.display(),
                        error = %e,
                        "Variables file could not be loaded - starting with an empty store"
                    );
                }
                Ok(LoadedStore {
                    store: ConfigStore::default(),
                    load_error: Some(e),
                })
            }
        },
    }
}

/// Pick the variables file location.
///
/// Resolution order: explicit override (CLI flag), then the
/// `GWADMIN_VARIABLES_FILE` environment variable when non-empty, then the
/// configured path from console settings.
pub fn resolve_variables_path(cli_override: Option<&Path>, configured: &Path) -> PathBuf {
    if let Some(path) = cli_override {
        return path.to_path_buf();
    }

    if let Ok(path_str) = std::env::var(VARIABLES_FILE_ENV)
        && !path_str.is_empty()
    {
        return PathBuf::from(path_str);
    }

    configured.to_path_buf()
}

/// Test utilities for the variables file env override.
#[doc(hidden)]
pub mod test_helpers {
    use std::sync::Mutex;

    use super::VARIABLES_FILE_ENV;

    /// Mutex to serialize tests that modify GWADMIN_VARIABLES_FILE.
    pub static VARIABLES_FILE_ENV_LOCK: Mutex<()> = Mutex::new(());

    /// RAII guard that removes GWADMIN_VARIABLES_FILE on drop.
    pub struct VariablesFileEnvGuard;

    impl VariablesFileEnvGuard {
        pub fn new(value: &str) -> Self {
            // SAFETY: Caller must hold VARIABLES_FILE_ENV_LOCK to serialize access
            // from Rust test code. Acceptable in test-only code.
            unsafe { std::env::set_var(VARIABLES_FILE_ENV, value) };
            Self
        }
    }

    impl Drop for VariablesFileEnvGuard {
        fn drop(&mut self) {
            // SAFETY: Caller must hold VARIABLES_FILE_ENV_LOCK throughout guard
            // lifetime. See safety comment in new().
            unsafe { std::env::remove_var(VARIABLES_FILE_ENV) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_reports_missing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("variables.json");

        let err = load(&path).unwrap_err();
        assert!(matches!(err, StoreError::ConfigFileMissing { .. }));
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("variables.json");

        let loaded = open_with_policy(&path, MissingFilePolicy::StartEmpty).unwrap();
        assert!(loaded.store.is_empty());
        assert!(loaded.store.get("anything").is_none());
        assert!(matches!(
            loaded.load_error,
            Some(StoreError::ConfigFileMissing { .. })
        ));
    }

    #[test]
    fn test_open_missing_file_terminate_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("variables.json");

        let result = open_with_policy(&path, MissingFilePolicy::Terminate);
        assert!(matches!(result, Err(StoreError::ConfigFileMissing { .. })));
    }

    #[test]
    fn test_load_distro_value() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("variables.json");
        std::fs::write(&path, r#"{"DISTRO": "22.04"}"#).unwrap();

        let store = load(&path).unwrap();
        assert_eq!(store.get("DISTRO"), Some(&json!("22.04")));
    }

    #[test]
    fn test_load_invalid_json_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("variables.json");
        std::fs::write(&path, "{ this is not valid json }").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, StoreError::ConfigParseError { .. }));

        let loaded = open_with_policy(&path, MissingFilePolicy::StartEmpty).unwrap();
        assert!(loaded.store.is_empty());
        assert!(matches!(
            loaded.load_error,
            Some(StoreError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_load_top_level_array_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("variables.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, StoreError::ConfigNotAnObject { .. }));
    }

    #[test]
    fn test_load_directory_is_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("variables.json");
        // A directory where a file is expected causes a read error
        std::fs::create_dir_all(&path).unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, StoreError::ConfigReadError { .. }));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("variables.json");

        let mut store = ConfigStore::new();
        store.set("DISTRO", "22.04");
        store.set("ADDRESS", "192.168.1.20");
        store.set("SERVICE_CACHE", "active");
        store.set("BACKUP_RETENTION", 14);
        store.set("TLS_ENABLED", false);
        store.set("LAST_BACKUP", json!(null));
        store.set(
            "UPDATE_SUMMARY",
            json!({
                "package_updates": 3,
                "app_update": {"current": "27.1.2", "available": "27.1.3"}
            }),
        );

        save(&store, &path).expect("save should succeed");
        let loaded = load(&path).expect("load should succeed");

        assert_eq!(loaded, store);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state").join("variables.json");

        save(&ConfigStore::new(), &path).expect("should create parent directory");
        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "{}");
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("variables.json");
        std::fs::write(&path, r#"{"OLD": 1}"#).unwrap();

        let mut store = ConfigStore::new();
        store.set("NEW", 2);
        save(&store, &path).unwrap();

        let loaded = load(&path).unwrap();
        assert!(loaded.get("OLD").is_none());
        assert_eq!(loaded.get("NEW"), Some(&json!(2)));
    }

    #[test]
    fn test_save_failure_keeps_memory_state() {
        let temp_dir = TempDir::new().unwrap();
        // The target is an existing directory, so the rename cannot replace it.
        let path = temp_dir.path().join("variables.json");
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        let mut store = ConfigStore::new();
        store.set("DISTRO", "24.04");

        let err = save(&store, &path).unwrap_err();
        assert!(matches!(err, StoreError::ConfigWriteError { .. }));
        assert_eq!(store.get_str("DISTRO"), Some("24.04"));
    }

    #[test]
    fn test_resolve_prefers_cli_override() {
        let _lock = VARIABLES_FILE_ENV_LOCK.lock().unwrap();
        let _guard = VariablesFileEnvGuard::new("/from/env.json");

        let path = resolve_variables_path(
            Some(Path::new("/from/cli.json")),
            Path::new(DEFAULT_VARIABLES_FILE),
        );
        assert_eq!(path, PathBuf::from("/from/cli.json"));
    }

    #[test]
    fn test_resolve_uses_env_override() {
        let _lock = VARIABLES_FILE_ENV_LOCK.lock().unwrap();
        let _guard = VariablesFileEnvGuard::new("/from/env.json");

        let path = resolve_variables_path(None, Path::new(DEFAULT_VARIABLES_FILE));
        assert_eq!(path, PathBuf::from("/from/env.json"));
    }

    #[test]
    fn test_resolve_empty_env_uses_configured() {
        let _lock = VARIABLES_FILE_ENV_LOCK.lock().unwrap();
        let _guard = VariablesFileEnvGuard::new("");

        let path = resolve_variables_path(None, Path::new("/etc/gwadmin/variables.json"));
        assert_eq!(path, PathBuf::from("/etc/gwadmin/variables.json"));
    }
}
