//! Interactive menus.
//!
//! Every action catches its own failures and reports them; only prompt I/O
//! errors leave the loop.

use std::error::Error;

use gwadmin_core::store;
use tracing::{error, info};

use crate::console::Console;
use crate::prompt::Prompt;

mod report;
mod services;
mod status;
mod updates;
mod variables;

const MAIN_ITEMS: [&str; 5] = ["Status overview", "Services", "Updates", "Variables", "Exit"];

/// How the operator left the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Saved,
    Discarded,
}

/// Run the main menu until the operator exits.
pub fn run(
    console: &mut Console,
    prompt: &mut dyn Prompt,
) -> Result<SessionEnd, Box<dyn Error>> {
    let items: Vec<String> = MAIN_ITEMS.iter().map(|s| s.to_string()).collect();

    loop {
        let choice = prompt.select("gwadmin", &items)?;
        info!(event = "cli.menu.selected", item = MAIN_ITEMS[choice]);

        match choice {
            0 => status::show(console, prompt)?,
            1 => services::run(console, prompt)?,
            2 => updates::run(console, prompt)?,
            3 => variables::run(console, prompt)?,
            _ => {
                if let Some(end) = exit(console, prompt)? {
                    return Ok(end);
                }
            }
        }
    }
}

/// Save the store on the way out. `None` when the operator went back to the
/// menu after a failed save.
fn exit(
    console: &Console,
    prompt: &mut dyn Prompt,
) -> Result<Option<SessionEnd>, Box<dyn Error>> {
    let items = vec![
        "Retry save".to_string(),
        "Exit without saving".to_string(),
        "Back to menu".to_string(),
    ];

    loop {
        match store::save(&console.store, &console.variables_path) {
            Ok(()) => {
                info!(
                    event = "cli.exit.saved",
                    path = %console.variables_path.display()
                );
                return Ok(Some(SessionEnd::Saved));
            }
            Err(e) => {
                error!(event = "cli.exit.save_failed", error = %e);
                report::failure(prompt, &e)?;
            }
        }

        match prompt.select("Variables were not saved", &items)? {
            0 => continue,
            1 => {
                info!(event = "cli.exit.discarded");
                return Ok(Some(SessionEnd::Discarded));
            }
            _ => return Ok(None),
        }
    }
}
