//! Settings for the console itself.
//!
//! These are distinct from the variables store: settings describe how the
//! console runs (where the variables file lives, how often to re-check for
//! updates, which systemd units make up the stack) and are read-only at
//! runtime.
//!
//! # Example
//!
//! ```toml
//! variables_file = "/var/lib/gwadmin/variables.json"
//!
//! [refresh]
//! update_interval_secs = 1800
//! advance_timestamp_on_failure = false
//!
//! [app]
//! occ_path = "/var/www/nextcloud/occ"
//! web_user = "www-data"
//!
//! [services]
//! database = "mariadb"
//! web = "nginx"
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use super::defaults;
use crate::refresh::RefreshPolicy;
use crate::store::DEFAULT_VARIABLES_FILE;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Location of the variables file. Default: `./variables.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables_file: Option<PathBuf>,

    #[serde(default)]
    pub refresh: RefreshSettings,

    #[serde(default)]
    pub app: AppSettings,

    /// Systemd unit overrides keyed by service name (`database`, `cache`,
    /// `web`, `mail`, `directory`, `containers`). Unknown names add a service.
    #[serde(default)]
    pub services: BTreeMap<String, String>,
}

/// Staleness-gate tuning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefreshSettings {
    /// Seconds a cached update summary stays fresh. Default: 3600.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_interval_secs: Option<u64>,

    /// Whether a failed check still counts as a check. Default: true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advance_timestamp_on_failure: Option<bool>,
}

/// Groupware application CLI location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occ_path: Option<String>,

    /// User the application CLI must run as.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_user: Option<String>,
}

impl ConsoleSettings {
    pub fn variables_file(&self) -> PathBuf {
        self.variables_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_VARIABLES_FILE))
    }

    pub fn update_interval(&self) -> TimeDelta {
        let secs = self
            .refresh
            .update_interval_secs
            .unwrap_or_else(defaults::default_update_interval_secs);
        i64::try_from(secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }

    pub fn refresh_policy(&self) -> RefreshPolicy {
        RefreshPolicy {
            advance_timestamp_on_failure: self
                .refresh
                .advance_timestamp_on_failure
                .unwrap_or_else(defaults::default_advance_timestamp_on_failure),
        }
    }

    pub fn occ_path(&self) -> &str {
        self.app
            .occ_path
            .as_deref()
            .unwrap_or(defaults::default_occ_path())
    }

    pub fn web_user(&self) -> &str {
        self.app
            .web_user
            .as_deref()
            .unwrap_or(defaults::default_web_user())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings: ConsoleSettings = toml::from_str("").unwrap();
        assert_eq!(settings.variables_file(), PathBuf::from("./variables.json"));
        assert_eq!(settings.update_interval(), TimeDelta::seconds(3600));
        assert!(settings.refresh_policy().advance_timestamp_on_failure);
        assert_eq!(settings.web_user(), "www-data");
        assert_eq!(settings.occ_path(), "/var/www/groupware/occ");
        assert!(settings.services.is_empty());
    }

    #[test]
    fn test_full_settings_parse() {
        let settings: ConsoleSettings = toml::from_str(
            r#"
variables_file = "/var/lib/gwadmin/variables.json"

[refresh]
update_interval_secs = 60
advance_timestamp_on_failure = false

[app]
occ_path = "/srv/www/occ"
web_user = "nginx"

[services]
database = "mariadb"
"#,
        )
        .unwrap();

        assert_eq!(
            settings.variables_file(),
            PathBuf::from("/var/lib/gwadmin/variables.json")
        );
        assert_eq!(settings.update_interval(), TimeDelta::seconds(60));
        assert!(!settings.refresh_policy().advance_timestamp_on_failure);
        assert_eq!(settings.occ_path(), "/srv/www/occ");
        assert_eq!(settings.web_user(), "nginx");
        assert_eq!(settings.services.get("database").unwrap(), "mariadb");
    }

    #[test]
    fn test_huge_interval_saturates() {
        let mut settings = ConsoleSettings::default();
        settings.refresh.update_interval_secs = Some(u64::MAX);
        assert_eq!(settings.update_interval(), TimeDelta::MAX);
    }

    #[test]
    fn test_settings_serialization_round_trip() {
        let mut settings = ConsoleSettings::default();
        settings.refresh.update_interval_secs = Some(900);
        settings
            .services
            .insert("web".to_string(), "nginx".to_string());

        let toml_str = toml::to_string(&settings).unwrap();
        assert!(toml_str.contains("update_interval_secs = 900"));
        let parsed: ConsoleSettings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, settings);
    }
}
