use std::path::PathBuf;

use gwadmin_core::services::{self, ServiceUnit};
use gwadmin_core::{Clock, CommandRunner, ConfigStore, ConsoleSettings};

/// Everything one operator session works on.
///
/// The store is owned here and handed to each menu action by `&mut`;
/// nothing else holds it.
pub struct Console {
    pub store: ConfigStore,
    pub variables_path: PathBuf,
    pub settings: ConsoleSettings,
    pub units: Vec<ServiceUnit>,
    pub runner: Box<dyn CommandRunner>,
    pub clock: Box<dyn Clock>,
}

impl Console {
    pub fn new(
        store: ConfigStore,
        variables_path: PathBuf,
        settings: ConsoleSettings,
        runner: Box<dyn CommandRunner>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let units = services::stack_units(&settings);
        Self {
            store,
            variables_path,
            settings,
            units,
            runner,
            clock,
        }
    }
}
