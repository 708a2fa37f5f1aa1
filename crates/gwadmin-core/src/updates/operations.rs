use tracing::{info, warn};

use super::errors::UpdateError;
use super::parsing::{app_update, parse_apt_upgradable, parse_installed_version, parse_update_check};
use super::types::UpdateSummary;
use crate::exec::{CommandRunner, CommandSpec};
use crate::refresh::{Clock, RefreshOutcome, ensure_fresh_in_store};
use crate::settings::ConsoleSettings;
use crate::store::ConfigStore;

/// Store key of the cached update summary.
pub const UPDATE_SUMMARY_KEY: &str = "UPDATE_SUMMARY";

/// `sudo -u <web user> php <occ> <args...>`
pub fn occ_command(settings: &ConsoleSettings, args: &[&str]) -> CommandSpec {
    CommandSpec::new("sudo")
        .args(["-u", settings.web_user(), "php", settings.occ_path()])
        .args(args.iter().copied())
}

/// Query the package manager and the application for available updates.
///
/// Runs every time it is called; use [`check_updates`] for the gated version.
pub fn compute_update_summary(
    runner: &dyn CommandRunner,
    settings: &ConsoleSettings,
) -> Result<UpdateSummary, UpdateError> {
    let apt = runner.run_checked(&CommandSpec::new("apt").args(["list", "--upgradable"]))?;
    let packages = parse_apt_upgradable(&apt.stdout);

    let check = runner.run_checked(&occ_command(settings, &["update:check"]))?;
    let (available, app_components) = parse_update_check(&check.stdout);

    // The installed version only decorates the summary; losing it is not fatal.
    let installed = match runner.run_checked(&occ_command(settings, &["status"])) {
        Ok(status) => parse_installed_version(&status.stdout),
        Err(e) => {
            warn!(event = "core.updates.installed_version_failed", error = %e);
            None
        }
    };

    let summary = UpdateSummary {
        packages,
        app: app_update(installed, available),
        app_components,
    };

    info!(
        event = "core.updates.summary_computed",
        packages = summary.packages.len(),
        app_update = summary.app.is_some(),
        app_components = summary.app_components.len()
    );

    Ok(summary)
}

/// Refresh the cached update summary if it has gone stale.
pub fn check_updates(
    store: &mut ConfigStore,
    runner: &dyn CommandRunner,
    settings: &ConsoleSettings,
    clock: &dyn Clock,
) -> RefreshOutcome {
    ensure_fresh_in_store(
        store,
        UPDATE_SUMMARY_KEY,
        settings.update_interval(),
        clock,
        settings.refresh_policy(),
        || -> Result<serde_json::Value, UpdateError> {
            let summary = compute_update_summary(runner, settings)?;
            Ok(serde_json::to_value(summary)?)
        },
    )
}

/// The last cached summary, if any and if it still decodes.
pub fn cached_summary(store: &ConfigStore) -> Option<UpdateSummary> {
    let value = store.get(UPDATE_SUMMARY_KEY)?;
    match serde_json::from_value(value.clone()) {
        Ok(summary) => Some(summary),
        Err(e) => {
            warn!(
                event = "core.updates.cached_summary_invalid",
                error = %e,
                "Ignoring cached update summary that no longer decodes"
            );
            None
        }
    }
}
