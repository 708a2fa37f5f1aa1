//! Running external administrative commands.
//!
//! Every status check and every state-changing menu action ends up here.
//! Commands block until they exit; there is no timeout or cancellation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, info, warn};

use super::errors::ExecError;

/// A program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Convenience for scripted outputs.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Runs external commands and captures their output.
pub trait CommandRunner {
    /// Run the command to completion. A non-zero exit is not an error here;
    /// some tools report state through their exit code.
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ExecError>;

    /// Run the command and treat a non-zero exit as [`ExecError::NonZeroExit`].
    fn run_checked(&self, spec: &CommandSpec) -> Result<CommandOutput, ExecError> {
        let output = self.run(spec)?;
        if output.success() {
            return Ok(output);
        }

        let stderr = output.stderr.trim().to_string();
        warn!(
            event = "core.exec.command_failed",
            command = %spec,
            code = output.code,
            stderr = %stderr
        );
        Err(ExecError::NonZeroExit {
            command: spec.to_string(),
            code: output.code.unwrap_or(-1),
            stderr,
        })
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for Rc<R> {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ExecError> {
        (**self).run(spec)
    }
}

/// Runs commands on the host via `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ExecError> {
        info!(event = "core.exec.command_started", command = %spec);

        let output = std::process::Command::new(&spec.program)
            .args(&spec.args)
            .output()
            .map_err(|e| ExecError::SpawnFailed {
                program: spec.program.clone(),
                source: e,
            })?;

        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!(
            event = "core.exec.command_completed",
            command = %spec,
            code = result.code,
            stdout_bytes = result.stdout.len()
        );

        Ok(result)
    }
}

/// Runner that answers from a table of canned outputs, keyed by the full
/// command line. Unknown commands fail as if the program were not installed.
#[doc(hidden)]
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, CommandOutput>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn respond(mut self, command_line: &str, output: CommandOutput) -> Self {
        self.responses.insert(command_line.to_string(), output);
        self
    }

    /// Command lines run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ExecError> {
        let line = spec.to_string();
        self.calls.borrow_mut().push(line.clone());
        self.responses
            .get(&line)
            .cloned()
            .ok_or_else(|| ExecError::SpawnFailed {
                program: spec.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no scripted response"),
            })
    }
}

/// Validate a value passed as a positional argument to an external tool.
///
/// Rejects empty values, values that start with `-` (option injection), and
/// values containing control characters.
pub fn validate_arg(value: &str, label: &str) -> Result<(), ExecError> {
    if value.is_empty() {
        return Err(ExecError::InvalidArgument {
            label: label.to_string(),
            message: "value is empty".to_string(),
        });
    }
    if value.starts_with('-') {
        return Err(ExecError::InvalidArgument {
            label: label.to_string(),
            message: format!("'{value}' must not start with '-'"),
        });
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(ExecError::InvalidArgument {
            label: label.to_string(),
            message: "contains control characters".to_string(),
        });
    }
    Ok(())
}
