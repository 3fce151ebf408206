//! Duplicate handling for parsed records.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ManifestError, ManifestResult};
use crate::record::ManifestRecord;

/// What to do when two documents share a duplicate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail on the first repeated resource
    #[default]
    Error,
    /// Keep the first occurrence and drop later ones
    Ignore,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Ignore => "ignore",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "ignore" => Ok(Self::Ignore),
            other => Err(format!(
                "unknown duplicate policy '{}', expected 'error' or 'ignore'",
                other
            )),
        }
    }
}

/// Deduplicate records in input order; the first occurrence of a key wins.
pub fn apply_duplicate_policy(
    records: Vec<ManifestRecord>,
    policy: DuplicatePolicy,
) -> ManifestResult<Vec<ManifestRecord>> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut deduped = Vec::with_capacity(records.len());

    for record in records {
        if seen.insert(record.duplicate_key()) {
            deduped.push(record);
            continue;
        }

        match policy {
            DuplicatePolicy::Error => {
                return Err(ManifestError::Duplicate {
                    api_version: record.api_version().to_string(),
                    kind: record.kind().to_string(),
                    name: record.name().to_string(),
                });
            }
            DuplicatePolicy::Ignore => {
                debug!(
                    "Ignoring duplicate manifest {}/{} ({})",
                    record.kind(),
                    record.name(),
                    record.api_version()
                );
            }
        }
    }

    Ok(deduped)
}
