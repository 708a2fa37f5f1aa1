use std::error::Error;

/// Base trait for all console errors
pub trait ConsoleError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the console
pub type ConsoleResult<T> = Result<T, Box<dyn ConsoleError>>;
