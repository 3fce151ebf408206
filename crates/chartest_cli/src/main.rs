//! chartest CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments or selector
//! - 3: Template command failed
//! - 4: Parse or duplicate error
//! - 5: Lookup error (not found or ambiguous)

use std::process::ExitCode;

use chartest_manifest::ManifestError;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const TEMPLATE_ERROR: u8 = 3;
    pub const PARSE_ERROR: u8 = 4;
    pub const LOOKUP_ERROR: u8 = 5;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        "chartest=debug,info"
    } else if cli.quiet {
        "error"
    } else {
        "chartest=info,warn"
    };

    // Logs go to stderr so rendered manifests on stdout stay pipeable
    let log_result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Get(args) => commands::get::execute(args, config),
        Commands::List(args) => commands::list::execute(args, config),
        Commands::Check(args) => commands::check::execute(args, config),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    let Some(err) = e.chain().find_map(|cause| cause.downcast_ref::<ManifestError>()) else {
        return ExitCodes::GENERAL_ERROR;
    };

    match err {
        ManifestError::InvalidSelector { .. } | ManifestError::InvalidFixture(_) => {
            ExitCodes::INVALID_ARGS
        }
        ManifestError::TemplateExecution(_) => ExitCodes::TEMPLATE_ERROR,
        ManifestError::Parse(_) | ManifestError::Duplicate { .. } => ExitCodes::PARSE_ERROR,
        ManifestError::NotFound(_) | ManifestError::Ambiguous { .. } => ExitCodes::LOOKUP_ERROR,
    }
}
