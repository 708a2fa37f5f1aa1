//! Text parsing for package-manager and application CLI output.
//!
//! Unrecognized lines are ignored; both tools print banners and progress
//! text around the lines that matter.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{AppComponentUpdate, AppUpdate, PackageUpdate};

// curl/jammy-updates 7.81.0-1ubuntu1.16 amd64 [upgradable from: 7.81.0-1ubuntu1.15]
static APT_UPGRADABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^/\s]+)/\S+\s+(?P<available>\S+)\s+\S+\s+\[upgradable from: (?P<current>[^\]]+)\]")
        .expect("apt upgradable pattern is valid")
});

// Nextcloud 28.0.4 is available. Get more information on how to update at ...
static SERVER_AVAILABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\S+(?: \S+)*? (?P<version>\d+(?:\.\d+)+) is available")
        .expect("server update pattern is valid")
});

// Update for calendar to version 4.7.0 is available.
static COMPONENT_AVAILABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Update for (?P<name>\S+) to version (?P<version>\S+) is available")
        .expect("app update pattern is valid")
});

//   - versionstring: 27.1.2
static VERSION_STRING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"versionstring:\s*(?P<version>\d+(?:\.\d+)+)").expect("version pattern is valid")
});

/// Parse `apt list --upgradable`.
pub fn parse_apt_upgradable(output: &str) -> Vec<PackageUpdate> {
    output
        .lines()
        .filter_map(|line| APT_UPGRADABLE.captures(line.trim()))
        .map(|caps| PackageUpdate {
            name: caps["name"].to_string(),
            current: caps["current"].trim().to_string(),
            available: caps["available"].to_string(),
        })
        .collect()
}

/// Parse the application's `update:check` output into the server update
/// (if any) and per-app updates.
pub fn parse_update_check(output: &str) -> (Option<String>, Vec<AppComponentUpdate>) {
    let mut server = None;
    let mut components = Vec::new();

    for line in output.lines().map(str::trim) {
        if let Some(caps) = COMPONENT_AVAILABLE.captures(line) {
            components.push(AppComponentUpdate {
                name: caps["name"].to_string(),
                version: caps["version"].trim_end_matches('.').to_string(),
            });
        } else if server.is_none()
            && let Some(caps) = SERVER_AVAILABLE.captures(line)
        {
            server = Some(caps["version"].to_string());
        }
    }

    (server, components)
}

/// Installed version from the application's `status` output.
pub fn parse_installed_version(output: &str) -> Option<String> {
    VERSION_STRING
        .captures(output)
        .map(|caps| caps["version"].to_string())
}

pub fn app_update(installed: Option<String>, available: Option<String>) -> Option<AppUpdate> {
    available.map(|available| AppUpdate {
        current: installed,
        available,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const APT_OUTPUT: &str = "\
Listing... Done
curl/jammy-updates,jammy-security 7.81.0-1ubuntu1.16 amd64 [upgradable from: 7.81.0-1ubuntu1.15]
redis-server/jammy-updates 5:6.0.16-1ubuntu1.1 amd64 [upgradable from: 5:6.0.16-1ubuntu1]
";

    #[test]
    fn test_parse_apt_upgradable() {
        let packages = parse_apt_upgradable(APT_OUTPUT);
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].name, "curl");
        assert_eq!(packages[0].available, "7.81.0-1ubuntu1.16");
        assert_eq!(packages[0].current, "7.81.0-1ubuntu1.15");
        assert_eq!(packages[1].name, "redis-server");
        assert_eq!(packages[1].current, "5:6.0.16-1ubuntu1");
    }

    #[test]
    fn test_parse_apt_nothing_upgradable() {
        assert!(parse_apt_upgradable("Listing... Done\n").is_empty());
        assert!(parse_apt_upgradable("").is_empty());
    }

    #[test]
    fn test_parse_update_check_with_updates() {
        let output = "\
Nextcloud 28.0.4 is available. Get more information on how to update at https://docs.example.org/.
Update for calendar to version 4.7.0 is available.
Update for contacts to version 5.5.3 is available.
3 updates available
";
        let (server, components) = parse_update_check(output);
        assert_eq!(server, Some("28.0.4".to_string()));
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].name, "calendar");
        assert_eq!(components[0].version, "4.7.0");
        assert_eq!(components[1].name, "contacts");
    }

    #[test]
    fn test_parse_update_check_up_to_date() {
        let (server, components) = parse_update_check("Everything up to date\n");
        assert!(server.is_none());
        assert!(components.is_empty());
    }

    #[test]
    fn test_parse_installed_version() {
        let output = "  - installed: true\n  - version: 27.1.2.1\n  - versionstring: 27.1.2\n  - edition: \n";
        assert_eq!(parse_installed_version(output), Some("27.1.2".to_string()));
        assert_eq!(parse_installed_version("not installed"), None);
    }

    #[test]
    fn test_app_update_requires_available_version() {
        assert!(app_update(Some("27.1.2".to_string()), None).is_none());
        let update = app_update(Some("27.1.2".to_string()), Some("28.0.4".to_string())).unwrap();
        assert_eq!(update.current.as_deref(), Some("27.1.2"));
        assert_eq!(update.available, "28.0.4");
    }
}
