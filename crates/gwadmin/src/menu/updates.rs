use std::error::Error;

use gwadmin_core::RefreshOutcome;
use gwadmin_core::refresh::last_check_key;
use gwadmin_core::updates::{self, UPDATE_SUMMARY_KEY, UpdateSummary};
use tracing::info;

use super::report;
use crate::console::Console;
use crate::prompt::Prompt;

pub fn run(console: &mut Console, prompt: &mut dyn Prompt) -> Result<(), Box<dyn Error>> {
    let items = vec![
        "Show summary".to_string(),
        "Check now".to_string(),
        "Back".to_string(),
    ];

    loop {
        match prompt.select("Updates", &items)? {
            0 => {
                let outcome = refresh(console);
                show_outcome(console, prompt, &outcome)?;
            }
            1 => {
                // Dropping the timestamp makes the next gate call run.
                console.store.remove(&last_check_key(UPDATE_SUMMARY_KEY));
                info!(event = "cli.updates.forced_check");
                let outcome = refresh(console);
                show_outcome(console, prompt, &outcome)?;
            }
            _ => return Ok(()),
        }
    }
}

fn refresh(console: &mut Console) -> RefreshOutcome {
    updates::check_updates(
        &mut console.store,
        console.runner.as_ref(),
        &console.settings,
        console.clock.as_ref(),
    )
}

fn show_outcome(
    console: &Console,
    prompt: &mut dyn Prompt,
    outcome: &RefreshOutcome,
) -> Result<(), Box<dyn Error>> {
    if let RefreshOutcome::Failed { message } = outcome {
        return report::failure(prompt, format!("Update check failed: {}", message));
    }

    match updates::cached_summary(&console.store) {
        Some(summary) => {
            print_details(&summary);
            report::success(prompt, summary)
        }
        None => report::failure(prompt, "No update information available"),
    }
}

fn print_details(summary: &UpdateSummary) {
    report::heading("Available updates");
    if let Some(app) = &summary.app {
        println!(
            "  Server: {} -> {}",
            app.current.as_deref().unwrap_or("?"),
            app.available
        );
    }
    for component in &summary.app_components {
        println!("  App {}: {}", component.name, component.version);
    }
    for package in &summary.packages {
        println!(
            "  Package {}: {} -> {}",
            package.name, package.current, package.available
        );
    }
}
