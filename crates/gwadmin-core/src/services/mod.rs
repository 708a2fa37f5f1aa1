pub mod errors;
pub mod operations;
pub mod types;

pub use errors::ServiceError;
pub use operations::{check_status, refresh_all, restart, stack_units};
pub use types::{ServiceState, ServiceUnit};
