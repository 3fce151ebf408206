//! Command runner trait and types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{CommandConfig, CommandLine};
use crate::error::{RunnerError, RunnerResult};

/// Result of a command execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// The command that was run
    pub command: CommandLine,
    /// Exit code (`None` if the process was terminated by a signal)
    pub exit_code: Option<i32>,
    /// Captured stdout
    pub stdout: String,
    /// Captured stderr
    pub stderr: String,
    /// Execution start time
    pub started_at: DateTime<Utc>,
    /// Execution end time
    pub finished_at: DateTime<Utc>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ExecutionResult {
    /// Check if execution was successful (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Turn a failed execution into an error, or hand back stdout.
    pub fn into_stdout(self) -> RunnerResult<String> {
        if self.success() {
            Ok(self.stdout)
        } else {
            Err(RunnerError::NonZeroExit {
                command: self.command,
                exit_code: self.exit_code,
                stdout: self.stdout,
                stderr: self.stderr,
            })
        }
    }
}

/// Executes templating commands.
///
/// Implementations return `Ok` for any process that ran, whatever its exit
/// code; only a process that could not be started is an `Err`.
pub trait CommandRunner: Send + Sync {
    /// Run the command and capture its output.
    fn run(&self, command: &CommandConfig) -> RunnerResult<ExecutionResult>;

    /// Run the command and return stdout, failing on a non-zero exit.
    fn run_checked(&self, command: &CommandConfig) -> RunnerResult<String> {
        command.validate()?;
        self.run(command)?.into_stdout()
    }
}
