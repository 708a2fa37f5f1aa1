use crate::errors::ConsoleError;
use crate::exec::ExecError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Service command failed: {source}")]
    Exec {
        #[from]
        source: ExecError,
    },
}

impl ConsoleError for ServiceError {
    fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Exec { .. } => "SERVICE_EXEC_FAILED",
        }
    }
}
