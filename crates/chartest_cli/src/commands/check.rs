//! Check command - Render every configured chart and report the result.

use std::path::Path;

use anyhow::{bail, Result};
use clap::Args;
use tracing::info;

use crate::config::Config;

#[derive(Args)]
pub struct CheckArgs {
    /// Only check these renders (defaults to all)
    #[arg(short, long = "render", value_name = "NAME")]
    renders: Vec<String>,
}

pub fn execute(args: CheckArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;

    let selected: Vec<_> = if args.renders.is_empty() {
        config.renders.iter().collect()
    } else {
        args.renders
            .iter()
            .map(|name| config.render(Some(name.as_str())))
            .collect::<Result<_>>()?
    };

    if selected.is_empty() {
        bail!("No renders configured");
    }

    let mut failed = 0;
    for render in &selected {
        info!("Checking render '{}'", render.name);
        match config.fixture(render)?.get() {
            Ok(index) => {
                println!("✅ {}: {} manifests", render.name, index.len());
            }
            Err(e) => {
                failed += 1;
                println!("❌ {}: {}", render.name, e);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} renders failed", failed, selected.len());
    }

    Ok(())
}
