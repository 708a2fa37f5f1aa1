use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use gwadmin_core::store::{self, MissingFilePolicy};
use gwadmin_core::system::{self, OS_RELEASE_PATH};
use gwadmin_core::{
    ConsoleSettings, LogLevel, SystemClock, SystemCommandRunner, events, init_logging, settings,
};
use tracing::{error, warn};

mod app;
mod console;
mod menu;
mod prompt;

use console::Console;
use menu::SessionEnd;
use prompt::TerminalPrompt;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = app::build_cli().get_matches();

    init_logging(LogLevel::from_flags(
        matches.get_flag("quiet"),
        matches.get_flag("verbose"),
    ));

    let settings = load_settings_with_warning();
    let variables_path = store::resolve_variables_path(
        matches.get_one::<PathBuf>("variables").map(PathBuf::as_path),
        &settings.variables_file(),
    );

    let policy = if matches.get_flag("strict") {
        MissingFilePolicy::Terminate
    } else {
        MissingFilePolicy::StartEmpty
    };

    let loaded = match store::open_with_policy(&variables_path, policy) {
        Ok(loaded) => loaded,
        Err(e) => {
            events::log_session_failed(&e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    if let Some(e) = &loaded.load_error {
        eprintln!("⚠️  {}. Starting with no variables.", e);
    }

    if !std::io::stdin().is_terminal() {
        error!(event = "cli.stdin_not_terminal");
        eprintln!("❌ gwadmin is interactive and needs a terminal on stdin.");
        std::process::exit(1);
    }

    events::log_session_started(&variables_path, policy, loaded.store.len());

    let runner = SystemCommandRunner;
    let mut store = loaded.store;
    for failure in system::ensure_static_facts(&mut store, &runner, Path::new(OS_RELEASE_PATH)) {
        eprintln!("⚠️  {}", failure);
    }

    let mut console = Console::new(
        store,
        variables_path,
        settings,
        Box::new(runner),
        Box::new(SystemClock),
    );
    match menu::run(&mut console, &mut TerminalPrompt) {
        Ok(end) => {
            events::log_session_ended(end == SessionEnd::Saved);
            Ok(())
        }
        Err(e) => {
            error!(event = "cli.menu.failed", error = %e);
            events::log_session_ended(false);
            Err(e)
        }
    }
}

fn load_settings_with_warning() -> ConsoleSettings {
    match settings::load_hierarchy() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!(
                "Warning: Could not load settings: {}. Using defaults.\n\
                 Tip: Check ~/.gwadmin/config.toml and ./.gwadmin/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.settings.load_failed",
                error = %e,
                "Settings load failed, using defaults"
            );
            ConsoleSettings::default()
        }
    }
}
