use crate::errors::ConsoleError;
use crate::exec::ExecError;

#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("Update check failed: {source}")]
    Exec {
        #[from]
        source: ExecError,
    },

    #[error("Failed to encode update summary: {source}")]
    Encode {
        #[from]
        source: serde_json::Error,
    },
}

impl ConsoleError for UpdateError {
    fn error_code(&self) -> &'static str {
        match self {
            UpdateError::Exec { .. } => "UPDATE_CHECK_FAILED",
            UpdateError::Encode { .. } => "UPDATE_ENCODE_FAILED",
        }
    }
}
