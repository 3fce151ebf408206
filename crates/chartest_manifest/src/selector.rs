//! Selector parsing.
//!
//! A selector is `kind/name` or `apiVersion/kind/name`. The last segment is
//! always the name and the one before it the kind; anything earlier is the
//! apiVersion, which may itself contain slashes (`apps/v1`).

use std::fmt;
use std::str::FromStr;

use crate::error::{ManifestError, ManifestResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub api_version: Option<String>,
    pub kind: String,
    pub name: String,
}

impl Selector {
    pub fn parse(selector: &str) -> ManifestResult<Self> {
        let mut parts: Vec<&str> = selector
            .trim()
            .split('/')
            .filter(|part| !part.is_empty())
            .collect();

        if parts.len() < 2 {
            return Err(ManifestError::InvalidSelector {
                selector: selector.to_string(),
            });
        }

        let name = parts.pop().unwrap_or_default().to_string();
        let kind = parts.pop().unwrap_or_default().to_string();
        let api_version = (!parts.is_empty()).then(|| parts.join("/"));

        Ok(Self {
            api_version,
            kind,
            name,
        })
    }
}

impl FromStr for Selector {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(api_version) = &self.api_version {
            write!(f, "{}/", api_version)?;
        }
        write!(f, "{}/{}", self.kind, self.name)
    }
}
