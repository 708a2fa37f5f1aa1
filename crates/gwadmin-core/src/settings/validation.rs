use super::errors::SettingsError;
use super::types::ConsoleSettings;
use crate::exec::validate_arg;

/// Validate merged settings before they are used.
///
/// Unit names and the web user end up as arguments to external commands,
/// so they get the same checks as any other command argument.
pub fn validate_settings(settings: &ConsoleSettings) -> Result<(), SettingsError> {
    for (name, unit) in &settings.services {
        validate_arg(unit, "unit name").map_err(|e| SettingsError::InvalidSetting {
            message: format!("services.{}: {}", name, e),
        })?;
    }

    validate_arg(settings.web_user(), "web user").map_err(|e| SettingsError::InvalidSetting {
        message: format!("app.web_user: {}", e),
    })?;

    if settings.occ_path().trim().is_empty() {
        return Err(SettingsError::InvalidSetting {
            message: "app.occ_path must not be empty".to_string(),
        });
    }

    Ok(())
}
