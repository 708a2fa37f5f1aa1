use tracing::{info, warn};

use super::errors::ServiceError;
use super::types::{ServiceState, ServiceUnit};
use crate::exec::{CommandRunner, CommandSpec, validate_arg};
use crate::settings::ConsoleSettings;
use crate::store::ConfigStore;

/// Units of the supporting stack, in menu order, before settings overrides.
const DEFAULT_STACK: &[(&str, &str, &str)] = &[
    ("database", "Database", "postgresql"),
    ("cache", "Cache", "redis-server"),
    ("web", "Web server", "apache2"),
    ("mail", "Mail relay", "postfix"),
    ("directory", "Directory service", "slapd"),
    ("containers", "Container engine", "docker"),
];

/// The stack's units with settings overrides applied.
///
/// Overrides for known names replace the unit; unknown names are appended
/// in key order with the name as label.
pub fn stack_units(settings: &ConsoleSettings) -> Vec<ServiceUnit> {
    let mut units: Vec<ServiceUnit> = DEFAULT_STACK
        .iter()
        .map(|(name, label, unit)| {
            let unit = settings
                .services
                .get(*name)
                .map(String::as_str)
                .unwrap_or(*unit);
            ServiceUnit::new(name, label, unit)
        })
        .collect();

    for (name, unit) in &settings.services {
        if !DEFAULT_STACK.iter().any(|(known, _, _)| *known == name.as_str()) {
            units.push(ServiceUnit::new(name, name, unit));
        }
    }

    units
}

/// Ask systemd for the unit's state.
///
/// `systemctl is-active` exits non-zero for anything but "active", so the
/// exit code is not treated as a failure here.
pub fn check_status(
    runner: &dyn CommandRunner,
    unit: &ServiceUnit,
) -> Result<ServiceState, ServiceError> {
    validate_arg(&unit.unit, "unit name")?;
    let output =
        runner.run(&CommandSpec::new("systemctl").args(["is-active", unit.unit.as_str()]))?;
    Ok(ServiceState::from_is_active(&output.stdout))
}

/// Check every unit and record its state under its store key.
///
/// A unit whose check cannot run is recorded as `unknown`.
pub fn refresh_all(
    store: &mut ConfigStore,
    runner: &dyn CommandRunner,
    units: &[ServiceUnit],
) -> Vec<(ServiceUnit, ServiceState)> {
    units
        .iter()
        .map(|unit| {
            let state = match check_status(runner, unit) {
                Ok(state) => state,
                Err(e) => {
                    warn!(
                        event = "core.services.status_check_failed",
                        unit = %unit.unit,
                        error = %e
                    );
                    ServiceState::Unknown
                }
            };
            store.set(unit.store_key(), state.as_str());
            (unit.clone(), state)
        })
        .collect()
}

pub fn restart(
    store: &mut ConfigStore,
    runner: &dyn CommandRunner,
    unit: &ServiceUnit,
) -> Result<ServiceState, ServiceError> {
    validate_arg(&unit.unit, "unit name")?;

    info!(event = "core.services.restart_started", unit = %unit.unit);
    runner.run_checked(&CommandSpec::new("systemctl").args(["restart", unit.unit.as_str()]))?;

    let state = check_status(runner, unit)?;
    store.set(unit.store_key(), state.as_str());
    info!(
        event = "core.services.restart_completed",
        unit = %unit.unit,
        state = %state
    );
    Ok(state)
}
