//! # chartest_runner
//!
//! Template command execution wrapper for chartest.
//!
//! This crate runs the external templating command (usually
//! `helm template ...`) whose output chartest indexes, and reports either the
//! rendered text or a structured failure.
//!
//! # Features
//!
//! - **Process Runner**: Runs the command on the host and captures its output
//! - **Structured Failures**: Exit code, stdout and stderr of failed renders
//! - **Mock Runner**: For testing without helm installed
//!
//! # Example
//!
//! ```rust,no_run
//! use chartest_runner::{CommandConfig, CommandRunner, ProcessRunner};
//!
//! let runner = ProcessRunner::default();
//! let command = CommandConfig::from_argv(["helm", "template", ".", "-f", "values.yaml"])
//!     .workdir("charts/app");
//!
//! let rendered = runner.run_checked(&command)?;
//! println!("{} bytes rendered", rendered.len());
//! # Ok::<(), chartest_runner::RunnerError>(())
//! ```

pub mod config;
pub mod error;
pub mod mock;
pub mod process;
pub mod runner;

pub use config::{CommandConfig, CommandLine};
pub use error::{RunnerError, RunnerResult};
pub use mock::{CapturedCall, MockResponse, MockRunner};
pub use process::{ProcessRunner, ProcessRunnerOptions};
pub use runner::{CommandRunner, ExecutionResult};
