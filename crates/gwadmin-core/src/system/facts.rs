//! Static host facts cached in the variables store.

use std::path::Path;

use tracing::{info, warn};

use super::errors::SystemError;
use crate::exec::{CommandRunner, CommandSpec};
use crate::store::ConfigStore;

pub const DISTRO_KEY: &str = "DISTRO";
pub const ADDRESS_KEY: &str = "ADDRESS";
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Extract `VERSION_ID` from os-release content, without quotes.
pub fn parse_os_release_version(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let value = line.trim().strip_prefix("VERSION_ID=")?;
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        (!value.is_empty()).then(|| value.to_string())
    })
}

pub fn detect_distro(os_release: &Path) -> Result<String, SystemError> {
    let content =
        std::fs::read_to_string(os_release).map_err(|e| SystemError::OsReleaseUnreadable {
            path: os_release.display().to_string(),
            source: e,
        })?;
    parse_os_release_version(&content).ok_or_else(|| SystemError::VersionMissing {
        path: os_release.display().to_string(),
    })
}

/// First address printed by `hostname -I`.
pub fn detect_address(runner: &dyn CommandRunner) -> Result<String, SystemError> {
    let output = runner.run_checked(&CommandSpec::new("hostname").arg("-I"))?;
    output
        .stdout
        .split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or(SystemError::NoAddress)
}

/// Fill `DISTRO` and `ADDRESS` when they are not in the store yet.
///
/// Facts already present are left alone. Detection failures are logged and
/// returned; they never stop the other fact from being detected.
pub fn ensure_static_facts(
    store: &mut ConfigStore,
    runner: &dyn CommandRunner,
    os_release: &Path,
) -> Vec<SystemError> {
    let mut failures = Vec::new();

    if !store.contains(DISTRO_KEY) {
        match detect_distro(os_release) {
            Ok(version) => {
                info!(event = "core.system.distro_detected", version = %version);
                store.set(DISTRO_KEY, version);
            }
            Err(e) => {
                warn!(event = "core.system.distro_detect_failed", error = %e);
                failures.push(e);
            }
        }
    }

    if !store.contains(ADDRESS_KEY) {
        match detect_address(runner) {
            Ok(address) => {
                info!(event = "core.system.address_detected", address = %address);
                store.set(ADDRESS_KEY, address);
            }
            Err(e) => {
                warn!(event = "core.system.address_detect_failed", error = %e);
                failures.push(e);
            }
        }
    }

    failures
}
