//! Error types for the runner module.

use std::sync::Arc;

use thiserror::Error;

use crate::config::CommandLine;

/// Result type alias for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Errors that can occur while executing a templating command.
///
/// Cloneable so a cached failure can be handed out more than once.
#[derive(Error, Debug, Clone)]
pub enum RunnerError {
    #[error("Failed to execute template command: {command}. Cause: {source}")]
    Spawn {
        command: CommandLine,
        #[source]
        source: Arc<std::io::Error>,
    },

    #[error(
        "Template command failed with exit code {}: {command}\nstderr:\n{}",
        display_exit_code(.exit_code),
        display_stream(.stderr)
    )]
    NonZeroExit {
        command: CommandLine,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

impl RunnerError {
    pub(crate) fn spawn(command: CommandLine, source: std::io::Error) -> Self {
        Self::Spawn {
            command,
            source: Arc::new(source),
        }
    }

    /// The command that failed, if one was run.
    pub fn command(&self) -> Option<&CommandLine> {
        match self {
            Self::Spawn { command, .. } | Self::NonZeroExit { command, .. } => Some(command),
            Self::InvalidCommand(_) => None,
        }
    }

    /// The exit code of a command that ran but failed.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::NonZeroExit { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}

fn display_exit_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "(terminated by signal)".to_string(),
    }
}

fn display_stream(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        "(empty)"
    } else {
        trimmed
    }
}
