use crate::errors::ConsoleError;

#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("Failed to execute '{program}': {source}")]
    SpawnFailed {
        program: String,
        source: std::io::Error,
    },

    #[error("'{command}' exited with status {code}: {stderr}")]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Invalid {label}: {message}")]
    InvalidArgument { label: String, message: String },
}

impl ConsoleError for ExecError {
    fn error_code(&self) -> &'static str {
        match self {
            ExecError::SpawnFailed { .. } => "EXEC_SPAWN_FAILED",
            ExecError::NonZeroExit { .. } => "EXEC_NON_ZERO_EXIT",
            ExecError::InvalidArgument { .. } => "EXEC_INVALID_ARGUMENT",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, ExecError::InvalidArgument { .. })
    }
}
