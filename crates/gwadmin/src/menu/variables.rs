use std::error::Error;

use gwadmin_core::store;
use serde_json::Value;
use tracing::{error, info};

use super::report;
use crate::console::Console;
use crate::prompt::Prompt;

pub fn run(console: &mut Console, prompt: &mut dyn Prompt) -> Result<(), Box<dyn Error>> {
    let items = vec![
        "List".to_string(),
        "Set".to_string(),
        "Remove".to_string(),
        "Save now".to_string(),
        "Back".to_string(),
    ];

    loop {
        match prompt.select("Variables", &items)? {
            0 => list(console, prompt)?,
            1 => set(console, prompt)?,
            2 => remove(console, prompt)?,
            3 => save(console, prompt)?,
            _ => return Ok(()),
        }
    }
}

fn list(console: &Console, prompt: &mut dyn Prompt) -> Result<(), Box<dyn Error>> {
    report::heading(&format!("Variables ({})", console.variables_path.display()));
    if console.store.is_empty() {
        println!("  (none)");
    }
    for (key, value) in console.store.iter() {
        println!("  {} = {}", key, value);
    }
    prompt.pause()
}

fn set(console: &mut Console, prompt: &mut dyn Prompt) -> Result<(), Box<dyn Error>> {
    let key = prompt.input("Key")?.trim().to_string();
    if key.is_empty() {
        return report::failure(prompt, "Key must not be empty");
    }

    let raw = prompt.input("Value (JSON, or plain text)")?;
    let value = parse_value(&raw);
    info!(event = "cli.variables.set", key = %key);
    console.store.set(key.as_str(), value.clone());
    report::success(prompt, format!("{} = {}", key, value))
}

fn remove(console: &mut Console, prompt: &mut dyn Prompt) -> Result<(), Box<dyn Error>> {
    let key = prompt.input("Key")?.trim().to_string();
    match console.store.remove(&key) {
        Some(_) => {
            info!(event = "cli.variables.removed", key = %key);
            report::success(prompt, format!("Removed {}", key))
        }
        None => report::failure(prompt, format!("No variable named '{}'", key)),
    }
}

fn save(console: &Console, prompt: &mut dyn Prompt) -> Result<(), Box<dyn Error>> {
    match store::save(&console.store, &console.variables_path) {
        Ok(()) => report::success(
            prompt,
            format!("Saved to {}", console.variables_path.display()),
        ),
        Err(e) => {
            error!(event = "cli.variables.save_failed", error = %e);
            report::failure(prompt, e)
        }
    }
}

/// Parse operator input into a stored value.
///
/// Quoted strings, objects, arrays, `true`, `false` and `null` are taken as
/// JSON. Everything else, numbers included, is kept as the text typed:
/// `22.10` must not turn into `22.1`.
pub(crate) fn parse_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Number(_)) | Err(_) => Value::String(trimmed.to_string()),
        Ok(value) => value,
    }
}
