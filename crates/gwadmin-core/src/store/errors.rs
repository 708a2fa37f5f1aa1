use crate::errors::ConsoleError;

/// Failures loading or persisting the variables file.
///
/// Note: This type intentionally does not implement `Clone` because
/// `io::Error` and `serde_json::Error` are not `Clone`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Variables file not found at '{path}'")]
    ConfigFileMissing { path: String },

    #[error("Failed to parse variables file '{path}': {source}")]
    ConfigParseError {
        path: String,
        source: serde_json::Error,
    },

    #[error("Variables file '{path}' must contain a JSON object at the top level")]
    ConfigNotAnObject { path: String },

    #[error("Failed to read variables file '{path}': {source}")]
    ConfigReadError {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write variables file '{path}': {message}")]
    ConfigWriteError { path: String, message: String },
}

impl ConsoleError for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            StoreError::ConfigFileMissing { .. } => "CONFIG_FILE_MISSING",
            StoreError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            StoreError::ConfigNotAnObject { .. } => "CONFIG_PARSE_ERROR",
            StoreError::ConfigReadError { .. } => "CONFIG_READ_ERROR",
            StoreError::ConfigWriteError { .. } => "CONFIG_WRITE_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        // Exhaustive match ensures new variants force an explicit classification.
        match self {
            StoreError::ConfigFileMissing { .. }
            | StoreError::ConfigParseError { .. }
            | StoreError::ConfigNotAnObject { .. } => true,

            StoreError::ConfigReadError { .. } | StoreError::ConfigWriteError { .. } => false,
        }
    }
}
