use crate::errors::ConsoleError;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to parse settings file '{path}': {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to read settings file '{path}': {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid setting: {message}")]
    InvalidSetting { message: String },
}

impl ConsoleError for SettingsError {
    fn error_code(&self) -> &'static str {
        match self {
            SettingsError::ParseError { .. } => "SETTINGS_PARSE_ERROR",
            SettingsError::IoError { .. } => "SETTINGS_IO_ERROR",
            SettingsError::InvalidSetting { .. } => "SETTINGS_INVALID",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            SettingsError::ParseError { .. } | SettingsError::InvalidSetting { .. }
        )
    }
}
