use std::error::Error;

use gwadmin_core::services::{self, ServiceUnit};
use tracing::{error, info};

use super::report;
use crate::console::Console;
use crate::prompt::Prompt;

const BACK: &str = "Back";

/// Pick a unit, then act on it, until the operator backs out.
pub fn run(console: &mut Console, prompt: &mut dyn Prompt) -> Result<(), Box<dyn Error>> {
    loop {
        let mut items: Vec<String> = console
            .units
            .iter()
            .map(|unit| format!("{} ({})", unit.label, unit.unit))
            .collect();
        items.push(BACK.to_string());

        let choice = prompt.select("Services", &items)?;
        let Some(unit) = console.units.get(choice).cloned() else {
            return Ok(());
        };
        unit_menu(console, prompt, &unit)?;
    }
}

fn unit_menu(
    console: &mut Console,
    prompt: &mut dyn Prompt,
    unit: &ServiceUnit,
) -> Result<(), Box<dyn Error>> {
    let items = vec![
        "Check status".to_string(),
        "Restart".to_string(),
        BACK.to_string(),
    ];

    loop {
        match prompt.select(&unit.label, &items)? {
            0 => match services::check_status(console.runner.as_ref(), unit) {
                Ok(state) => {
                    console.store.set(unit.store_key(), state.as_str());
                    if state.is_up() {
                        report::success(prompt, format!("{} is {}", unit.unit, state))?;
                    } else {
                        report::failure(prompt, format!("{} is {}", unit.unit, state))?;
                    }
                }
                Err(e) => report::failure(prompt, format!("Status check failed: {}", e))?,
            },
            1 => {
                info!(event = "cli.services.restart_requested", unit = %unit.unit);
                match services::restart(&mut console.store, console.runner.as_ref(), unit) {
                    Ok(state) if state.is_up() => {
                        report::success(prompt, format!("{} restarted", unit.unit))?
                    }
                    Ok(state) => report::failure(
                        prompt,
                        format!("{} restarted but is {}", unit.unit, state),
                    )?,
                    Err(e) => {
                        error!(
                            event = "cli.services.restart_failed",
                            unit = %unit.unit,
                            error = %e
                        );
                        report::failure(prompt, format!("Restart failed: {}", e))?
                    }
                }
            }
            _ => return Ok(()),
        }
    }
}
