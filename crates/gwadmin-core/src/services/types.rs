use std::fmt;

use serde::{Deserialize, Serialize};

/// One systemd unit in the groupware stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceUnit {
    /// Settings key, e.g. `database`.
    pub name: String,
    /// Menu label, e.g. `Database`.
    pub label: String,
    /// Systemd unit, e.g. `postgresql`.
    pub unit: String,
}

impl ServiceUnit {
    pub fn new(name: &str, label: &str, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            unit: unit.to_string(),
        }
    }

    /// Store key holding this unit's last-known state, e.g. `SERVICE_DATABASE`.
    pub fn store_key(&self) -> String {
        format!("SERVICE_{}", self.name.to_uppercase().replace('-', "_"))
    }
}

/// State reported by `systemctl is-active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceState {
    Active,
    Inactive,
    Failed,
    /// Starting, stopping, reloading or anything systemd adds later.
    Transitioning,
    Unknown,
}

impl ServiceState {
    pub fn from_is_active(output: &str) -> Self {
        match output.trim() {
            "active" => ServiceState::Active,
            "inactive" => ServiceState::Inactive,
            "failed" => ServiceState::Failed,
            "activating" | "deactivating" | "reloading" | "refreshing" => {
                ServiceState::Transitioning
            }
            _ => ServiceState::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceState::Active => "active",
            ServiceState::Inactive => "inactive",
            ServiceState::Failed => "failed",
            ServiceState::Transitioning => "transitioning",
            ServiceState::Unknown => "unknown",
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, ServiceState::Active)
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
