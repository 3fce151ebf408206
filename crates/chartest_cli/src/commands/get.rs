//! Get command - Print one rendered manifest.

use std::path::Path;

use anyhow::Result;
use clap::{Args, ValueEnum};

use super::source::SourceArgs;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Args)]
pub struct GetArgs {
    /// Selector: kind/name or apiVersion/kind/name (case-insensitive)
    selector: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    output: OutputFormat,

    #[command(flatten)]
    source: SourceArgs,
}

pub fn execute(args: GetArgs, config: Option<&Path>) -> Result<()> {
    let index = args.source.load_index(config)?;
    let manifest = index.get(&args.selector)?;

    match args.output {
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(manifest.value())?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(manifest.value())?),
    }

    Ok(())
}
