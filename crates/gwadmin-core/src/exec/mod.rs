pub mod errors;
pub mod runner;

pub use errors::ExecError;
pub use runner::{
    CommandOutput, CommandRunner, CommandSpec, ScriptedRunner, SystemCommandRunner, validate_arg,
};
