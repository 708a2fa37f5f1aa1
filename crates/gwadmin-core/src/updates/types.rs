use std::fmt;

use serde::{Deserialize, Serialize};

/// A package the system package manager can upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageUpdate {
    pub name: String,
    pub current: String,
    pub available: String,
}

/// A newer release of the groupware server itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppUpdate {
    /// Installed version, when the application reported it.
    pub current: Option<String>,
    pub available: String,
}

/// A newer version of one installed groupware app (plugin).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppComponentUpdate {
    pub name: String,
    pub version: String,
}

/// Everything that can currently be updated.
///
/// Cached in the variables store by the update check, so every field must
/// round-trip through JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSummary {
    #[serde(default)]
    pub packages: Vec<PackageUpdate>,
    #[serde(default)]
    pub app: Option<AppUpdate>,
    #[serde(default)]
    pub app_components: Vec<AppComponentUpdate>,
}

impl UpdateSummary {
    pub fn is_up_to_date(&self) -> bool {
        self.packages.is_empty() && self.app.is_none() && self.app_components.is_empty()
    }
}

impl fmt::Display for UpdateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_up_to_date() {
            return f.write_str("Everything up to date");
        }

        let mut parts = Vec::new();
        if !self.packages.is_empty() {
            parts.push(format!("{} package update(s)", self.packages.len()));
        }
        if let Some(app) = &self.app {
            match &app.current {
                Some(current) => parts.push(format!("server {} -> {}", current, app.available)),
                None => parts.push(format!("server {} available", app.available)),
            }
        }
        if !self.app_components.is_empty() {
            parts.push(format!("{} app update(s)", self.app_components.len()));
        }
        f.write_str(&parts.join(", "))
    }
}
