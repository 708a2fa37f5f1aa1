//! Result lines shared by every menu action.

use std::error::Error;
use std::fmt::Display;

use colored::Colorize;

use crate::prompt::Prompt;

pub fn success(prompt: &mut dyn Prompt, message: impl Display) -> Result<(), Box<dyn Error>> {
    println!("{} {}", "✓".green(), message);
    prompt.pause()
}

pub fn failure(prompt: &mut dyn Prompt, message: impl Display) -> Result<(), Box<dyn Error>> {
    println!("{} {}", "✗".red(), message);
    prompt.pause()
}

/// Print a heading for an informational screen.
pub fn heading(title: &str) {
    println!();
    println!("{}", title.bold());
}
