use crate::errors::ConsoleError;
use crate::exec::ExecError;

#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    #[error("Failed to read '{path}': {source}")]
    OsReleaseUnreadable {
        path: String,
        source: std::io::Error,
    },

    #[error("No VERSION_ID in '{path}'")]
    VersionMissing { path: String },

    #[error("No network address reported by 'hostname -I'")]
    NoAddress,

    #[error("System probe failed: {source}")]
    Exec {
        #[from]
        source: ExecError,
    },
}

impl ConsoleError for SystemError {
    fn error_code(&self) -> &'static str {
        match self {
            SystemError::OsReleaseUnreadable { .. } => "SYSTEM_OS_RELEASE_UNREADABLE",
            SystemError::VersionMissing { .. } => "SYSTEM_VERSION_MISSING",
            SystemError::NoAddress => "SYSTEM_NO_ADDRESS",
            SystemError::Exec { .. } => "SYSTEM_EXEC_FAILED",
        }
    }
}
