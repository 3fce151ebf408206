//! Where the rendered manifests come from.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use chartest_manifest::{parse_manifest_documents, DuplicatePolicy, ManifestFixture, ManifestIndex};

use crate::config::Config;

#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Read rendered YAML from a file ('-' for stdin) instead of running a command
    #[arg(short, long, conflicts_with = "render")]
    pub input: Option<PathBuf>,

    /// Name of a render from the config file
    #[arg(short, long)]
    pub render: Option<String>,

    /// How to handle resources rendered twice (error, ignore)
    #[arg(long, value_name = "POLICY")]
    pub on_duplicate: Option<DuplicatePolicy>,

    /// Templating command to run, e.g. `-- helm template . -f values.yaml`
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl SourceArgs {
    /// Build the index from the first source given: input file, trailing
    /// command, then the configured render.
    pub fn load_index(&self, config_path: Option<&Path>) -> Result<Arc<ManifestIndex>> {
        if let Some(input) = &self.input {
            let text = read_input(input)?;
            let policy = self.on_duplicate.unwrap_or_default();
            let index = parse_manifest_documents(&text, policy)
                .with_context(|| format!("Failed to index {}", input.display()))?;
            return Ok(Arc::new(index));
        }

        let fixture = if self.command.is_empty() {
            let config = Config::load(config_path)?;
            let render = config.render(self.render.as_deref())?;
            info!("Using render '{}'", render.name);
            config.fixture(render)?
        } else {
            ManifestFixture::new("command", self.command.iter().cloned())?
        };

        let fixture = match self.on_duplicate {
            Some(policy) => fixture.on_duplicate(policy),
            None => fixture,
        };

        Ok(fixture.get()?)
    }
}

fn read_input(input: &Path) -> Result<String> {
    if input.as_os_str() == "-" {
        return io::read_to_string(io::stdin()).context("Failed to read manifests from stdin");
    }
    fs::read_to_string(input).with_context(|| format!("Failed to read {}", input.display()))
}
