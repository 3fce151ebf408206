//! Render-and-index pipeline.

use chartest_runner::{CommandConfig, CommandRunner};
use tracing::{debug, info};

use crate::error::ManifestResult;
use crate::index::ManifestIndex;
use crate::parser::parse_documents;
use crate::policy::{apply_duplicate_policy, DuplicatePolicy};

/// Parse rendered manifest YAML into a selector-based index.
pub fn parse_manifest_documents(
    manifest_text: &str,
    on_duplicate: DuplicatePolicy,
) -> ManifestResult<ManifestIndex> {
    let records = parse_documents(manifest_text)?;
    let parsed = records.len();
    let records = apply_duplicate_policy(records, on_duplicate)?;

    if records.len() != parsed {
        debug!("Dropped {} duplicate manifests", parsed - records.len());
    }

    Ok(ManifestIndex::new(records))
}

/// Run the templating command and index its output.
pub fn load_manifest(
    runner: &dyn CommandRunner,
    command: &CommandConfig,
    on_duplicate: DuplicatePolicy,
) -> ManifestResult<ManifestIndex> {
    let rendered = runner.run_checked(command)?;
    let index = parse_manifest_documents(&rendered, on_duplicate)?;
    info!(
        "Indexed {} manifests from {}",
        index.len(),
        command.command_line()
    );
    Ok(index)
}
