//! Process-based command runner.
//!
//! Runs the templating command directly on the host with
//! `std::process::Command`, capturing stdout and stderr in full.

use std::process::{Command, Stdio};
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::CommandConfig;
use crate::error::{RunnerError, RunnerResult};
use crate::runner::{CommandRunner, ExecutionResult};

/// Process runner options.
#[derive(Debug, Clone)]
pub struct ProcessRunnerOptions {
    /// Forward each stderr line to the log once the command finishes
    pub log_stderr: bool,
    /// Inherit the parent environment (extra variables are layered on top)
    pub inherit_env: bool,
}

impl Default for ProcessRunnerOptions {
    fn default() -> Self {
        Self {
            log_stderr: true,
            inherit_env: true,
        }
    }
}

impl ProcessRunnerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_stderr(mut self, enabled: bool) -> Self {
        self.log_stderr = enabled;
        self
    }

    /// Start the command with an empty environment.
    pub fn clear_env(mut self) -> Self {
        self.inherit_env = false;
        self
    }
}

/// Runner that spawns the templating command as a child process.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    options: ProcessRunnerOptions,
}

impl ProcessRunner {
    pub fn new(options: ProcessRunnerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ProcessRunnerOptions {
        &self.options
    }

    fn build_command(&self, config: &CommandConfig) -> Command {
        let mut cmd = Command::new(&config.program);
        cmd.args(&config.args);
        if !self.options.inherit_env {
            cmd.env_clear();
        }
        cmd.envs(&config.env);
        if let Some(workdir) = &config.workdir {
            cmd.current_dir(workdir);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, config: &CommandConfig) -> RunnerResult<ExecutionResult> {
        let command_line = config.command_line();
        info!("Running template command: {}", command_line);
        if let Some(workdir) = &config.workdir {
            debug!("Working directory: {:?}", workdir);
        }

        let started_at = Utc::now();
        let start = Instant::now();

        let output = self
            .build_command(config)
            .output()
            .map_err(|e| RunnerError::spawn(command_line.clone(), e))?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if self.options.log_stderr {
            for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
                debug!("[stderr] {}", line);
            }
        }

        let exit_code = output.status.code();
        if output.status.success() {
            debug!(
                "Template command finished in {}ms ({} bytes of output)",
                duration_ms,
                stdout.len()
            );
        } else {
            warn!(
                "Template command exited with {:?} after {}ms",
                exit_code, duration_ms
            );
        }

        Ok(ExecutionResult {
            command: command_line,
            exit_code,
            stdout,
            stderr,
            started_at,
            finished_at: Utc::now(),
            duration_ms,
        })
    }
}
