use std::error::Error;

use chrono::TimeDelta;
use colored::Colorize;
use gwadmin_core::services::{self, ServiceState};
use gwadmin_core::system::{ADDRESS_KEY, DISTRO_KEY};
use gwadmin_core::updates::{self, UPDATE_SUMMARY_KEY};
use gwadmin_core::{ConfigStore, RefreshOutcome, RefreshRecord};
use serde_json::Value;
use tracing::info;

use super::report;
use crate::console::Console;
use crate::prompt::Prompt;

/// Print host facts, service states and the gated update summary.
pub fn show(console: &mut Console, prompt: &mut dyn Prompt) -> Result<(), Box<dyn Error>> {
    info!(event = "cli.status.show_started");

    let states =
        services::refresh_all(&mut console.store, console.runner.as_ref(), &console.units);
    let outcome = updates::check_updates(
        &mut console.store,
        console.runner.as_ref(),
        &console.settings,
        console.clock.as_ref(),
    );

    report::heading("Host");
    println!("  OS version: {}", fact(&console.store, DISTRO_KEY));
    println!("  Address:    {}", fact(&console.store, ADDRESS_KEY));

    report::heading("Services");
    for (unit, state) in &states {
        println!("  {:<20} {:<14} {}", unit.label, unit.unit, colorize_state(*state));
    }

    report::heading("Updates");
    match updates::cached_summary(&console.store) {
        Some(summary) => {
            let record = RefreshRecord::load(
                &console.store,
                UPDATE_SUMMARY_KEY,
                console.settings.update_interval(),
            );
            match record.age(console.clock.now()) {
                Some(age) => println!("  {} (checked {})", summary, format_age(age)),
                None => println!("  {}", summary),
            }
        }
        None => println!("  No update information yet"),
    }

    if let RefreshOutcome::Failed { message } = &outcome {
        return report::failure(prompt, format!("Update check failed: {}", message));
    }

    let down = states.iter().filter(|(_, state)| !state.is_up()).count();
    if down > 0 {
        report::failure(prompt, format!("{} service(s) not active", down))
    } else {
        report::success(prompt, "All services active")
    }
}

/// A stored fact for display. Strings print bare, anything else as JSON.
pub(crate) fn fact(store: &ConfigStore, key: &str) -> String {
    match store.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "unknown".to_string(),
    }
}

fn colorize_state(state: ServiceState) -> colored::ColoredString {
    match state {
        ServiceState::Active => state.as_str().green(),
        ServiceState::Failed => state.as_str().red(),
        _ => state.as_str().yellow(),
    }
}

pub(crate) fn format_age(age: TimeDelta) -> String {
    let secs = age.num_seconds().max(0);
    if secs < 60 {
        "just now".to_string()
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h {}m ago", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}
