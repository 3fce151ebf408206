//! Selector-based lookup over parsed manifest records.

use std::collections::HashMap;
use std::fmt;

use crate::document::Manifest;
use crate::error::{ManifestError, ManifestResult, NotFoundError};
use crate::record::{fold, ManifestRecord};
use crate::selector::Selector;

/// Immutable, queryable collection of rendered manifests.
///
/// Lookups are case-insensitive on every selector segment while error
/// messages and summaries report the original casing.
#[derive(Clone, Default)]
pub struct ManifestIndex {
    records: Vec<ManifestRecord>,
}

/// Kinds with their resource names, as reported by [`ManifestIndex::summary`].
pub type KindSummary<'a> = Vec<(&'a str, Vec<&'a str>)>;

impl ManifestIndex {
    /// Build an index over already-deduplicated records.
    pub fn new(records: Vec<ManifestRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in stored (document) order.
    pub fn records(&self) -> impl Iterator<Item = &ManifestRecord> {
        self.records.iter()
    }

    /// Resolve a `kind/name` or `apiVersion/kind/name` selector.
    pub fn get(&self, selector: &str) -> ManifestResult<&Manifest> {
        self.resolve(&Selector::parse(selector)?)
            .map(ManifestRecord::manifest)
    }

    /// Resolve a parsed selector to its record.
    pub fn resolve(&self, selector: &Selector) -> ManifestResult<&ManifestRecord> {
        let kind_records = self.records_for_kind(&selector.kind)?;
        let name_records = records_for_name(&kind_records, &selector.kind, &selector.name)?;

        match &selector.api_version {
            None => single_or_ambiguous(&selector.kind, &selector.name, &name_records),
            Some(api_version) => {
                match_api_version(&selector.kind, &selector.name, api_version, &name_records)
            }
        }
    }

    /// Distinct kinds, sorted case-insensitively.
    pub fn kinds(&self) -> Vec<&str> {
        distinct_sorted(self.records.iter().map(ManifestRecord::kind))
    }

    /// Distinct kinds, each with its distinct names, both sorted
    /// case-insensitively.
    pub fn summary(&self) -> KindSummary<'_> {
        self.kinds()
            .into_iter()
            .map(|kind| {
                let names = distinct_sorted(
                    self.records
                        .iter()
                        .filter(|record| record.kind_matches(kind))
                        .map(ManifestRecord::name),
                );
                (kind, names)
            })
            .collect()
    }

    fn records_for_kind(&self, kind: &str) -> ManifestResult<Vec<&ManifestRecord>> {
        let matches: Vec<&ManifestRecord> = self
            .records
            .iter()
            .filter(|record| record.kind_matches(kind))
            .collect();

        if matches.is_empty() {
            return Err(NotFoundError::Kind {
                kind: kind.to_string(),
                available: owned(self.kinds()),
            }
            .into());
        }
        Ok(matches)
    }
}

fn records_for_name<'a>(
    records: &[&'a ManifestRecord],
    kind: &str,
    name: &str,
) -> ManifestResult<Vec<&'a ManifestRecord>> {
    let matches: Vec<&ManifestRecord> = records
        .iter()
        .copied()
        .filter(|record| record.name_matches(name))
        .collect();

    if matches.is_empty() {
        return Err(NotFoundError::Name {
            kind: kind.to_string(),
            name: name.to_string(),
            available: owned(distinct_sorted(records.iter().map(|r| r.name()))),
        }
        .into());
    }
    Ok(matches)
}

fn single_or_ambiguous<'a>(
    kind: &str,
    name: &str,
    records: &[&'a ManifestRecord],
) -> ManifestResult<&'a ManifestRecord> {
    let api_versions = distinct_sorted(records.iter().map(|r| r.api_version()));

    match (api_versions.len(), records.first().copied()) {
        (1, Some(record)) => Ok(record),
        _ => Err(ManifestError::Ambiguous {
            kind: kind.to_string(),
            name: name.to_string(),
            candidates: owned(api_versions),
        }),
    }
}

fn match_api_version<'a>(
    kind: &str,
    name: &str,
    api_version: &str,
    records: &[&'a ManifestRecord],
) -> ManifestResult<&'a ManifestRecord> {
    records
        .iter()
        .copied()
        .find(|record| record.api_version_matches(api_version))
        .ok_or_else(|| {
            NotFoundError::ApiVersion {
                kind: kind.to_string(),
                name: name.to_string(),
                api_version: api_version.to_string(),
                available: owned(distinct_sorted(records.iter().map(|r| r.api_version()))),
            }
            .into()
        })
}

/// Deduplicate on the folded value, keeping the first casing seen, then sort
/// case-insensitively.
fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: HashMap<String, &'a str> = HashMap::new();
    for value in values {
        seen.entry(fold(value)).or_insert(value);
    }

    let mut distinct: Vec<(String, &'a str)> = seen.into_iter().collect();
    distinct.sort();
    distinct.into_iter().map(|(_, value)| value).collect()
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}

impl fmt::Debug for ManifestIndex {
    /// Renders `ManifestIndex({"ConfigMap": ["example-config"], ...})`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ManifestIndex(")?;
        f.debug_map().entries(self.summary()).finish()?;
        f.write_str(")")
    }
}
