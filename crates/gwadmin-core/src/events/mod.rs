//! Console session lifecycle events.

use std::path::Path;

use tracing::{error, info};

use crate::errors::ConsoleError;
use crate::store::MissingFilePolicy;

/// Session opened: which variables file it works on, and how a missing
/// file was treated.
pub fn log_session_started(variables_path: &Path, policy: MissingFilePolicy, loaded_keys: usize) {
    info!(
        event = "core.session.started",
        version = env!("CARGO_PKG_VERSION"),
        variables_path = %variables_path.display(),
        policy = ?policy,
        loaded_keys
    );
}

/// Session closed. `saved` is false when the operator left without a
/// successful save or the menu loop failed.
pub fn log_session_ended(saved: bool) {
    info!(event = "core.session.ended", saved);
}

/// A console error that ended the session or stopped it from starting.
pub fn log_session_failed(error: &dyn ConsoleError) {
    error!(
        event = "core.session.failed",
        error_code = error.error_code(),
        user_error = error.is_user_error(),
        error = %error
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_session_events() {
        log_session_started(Path::new("./variables.json"), MissingFilePolicy::StartEmpty, 3);
        log_session_ended(true);
        log_session_ended(false);

        let error = StoreError::ConfigFileMissing {
            path: "./variables.json".to_string(),
        };
        log_session_failed(&error);
    }
}
