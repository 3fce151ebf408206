//! List command - Show the kinds and names of every rendered manifest.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use serde_json::json;

use super::source::SourceArgs;

#[derive(Args)]
pub struct ListArgs {
    /// Print JSON instead of an indented listing
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    source: SourceArgs,
}

pub fn execute(args: ListArgs, config: Option<&Path>) -> Result<()> {
    let index = args.source.load_index(config)?;
    let summary = index.summary();

    if args.json {
        let kinds: Vec<_> = summary
            .iter()
            .map(|(kind, names)| json!({ "kind": kind, "names": names }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&kinds)?);
        return Ok(());
    }

    if summary.is_empty() {
        println!("(no manifests rendered)");
        return Ok(());
    }

    for (kind, names) in &summary {
        println!("{}", kind);
        for name in names {
            println!("  {}", name);
        }
    }

    Ok(())
}
