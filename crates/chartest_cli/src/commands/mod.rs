//! CLI command definitions.
//!
//! This module defines the command structure for the chartest CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod check;
pub mod get;
pub mod list;
pub mod source;

/// chartest - query rendered Kubernetes manifests by selector
#[derive(Parser)]
#[command(name = "chartest")]
#[command(version, about = "chartest - query rendered Kubernetes manifests by selector")]
#[command(long_about = r#"
chartest renders a chart with an external templating command and lets you
look up individual resources by kind/name or apiVersion/kind/name.

COMMANDS:
  get    → Print one manifest
  list   → List kinds and names
  check  → Render every configured chart

EXAMPLES:
  chartest get deployment/example-api -- helm template . -f values.yaml
  chartest get apps/v1/deployment/example-api --render default
  helm template . | chartest list --input -

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments or selector
  3 - Template command failed
  4 - Rendered YAML could not be indexed
  5 - Selector matched nothing, or more than one apiVersion
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file (defaults to ./chartest.yaml when present)
    #[arg(short, long, global = true, env = "CHARTEST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one rendered manifest
    Get(get::GetArgs),

    /// List kinds and names of rendered manifests
    List(list::ListArgs),

    /// Render every configured chart and report resource counts
    Check(check::CheckArgs),
}
