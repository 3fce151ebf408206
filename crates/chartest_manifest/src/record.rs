//! Manifest records and their identity.

use crate::document::Manifest;

/// Case-folded `(kind, name, apiVersion)` triple identifying one logical
/// resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateKey {
    pub kind: String,
    pub name: String,
    pub api_version: String,
}

/// One rendered resource document with its identity fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestRecord {
    api_version: String,
    kind: String,
    name: String,
    manifest: Manifest,
}

impl ManifestRecord {
    /// Create a record. Identity fields are kept in their original casing.
    pub fn new(
        api_version: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
        manifest: Manifest,
    ) -> Self {
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
            name: name.into(),
            manifest,
        }
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn duplicate_key(&self) -> DuplicateKey {
        DuplicateKey {
            kind: fold(&self.kind),
            name: fold(&self.name),
            api_version: fold(&self.api_version),
        }
    }

    pub(crate) fn kind_matches(&self, kind: &str) -> bool {
        eq_ignore_case(&self.kind, kind)
    }

    pub(crate) fn name_matches(&self, name: &str) -> bool {
        eq_ignore_case(&self.name, name)
    }

    pub(crate) fn api_version_matches(&self, api_version: &str) -> bool {
        eq_ignore_case(&self.api_version, api_version)
    }
}

/// Normalized projection used for every identity comparison.
pub(crate) fn fold(s: &str) -> String {
    s.to_lowercase()
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || fold(a) == fold(b)
}
