//! Error types for manifest loading and lookup.

use std::fmt;

use chartest_runner::RunnerError;
use thiserror::Error;

/// Result type alias for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Identity field every manifest document must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestField {
    ApiVersion,
    Kind,
    MetadataName,
}

impl ManifestField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiVersion => "apiVersion",
            Self::Kind => "kind",
            Self::MetadataName => "metadata.name",
        }
    }
}

impl fmt::Display for ManifestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendered YAML that cannot be read as Kubernetes manifests.
///
/// `document` is the 1-based position of the offending document in the
/// stream, counting empty documents.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("YAML document #{document} is not a mapping object.")]
    NotAMapping { document: usize },

    #[error("YAML document #{document} is missing non-empty '{field}'.")]
    MissingField {
        document: usize,
        field: ManifestField,
    },

    #[error("YAML document #{document} could not be parsed: {message}")]
    InvalidYaml { document: usize, message: String },
}

impl ParseError {
    pub fn document(&self) -> usize {
        match self {
            Self::NotAMapping { document }
            | Self::MissingField { document, .. }
            | Self::InvalidYaml { document, .. } => *document,
        }
    }
}

/// A selector that matched nothing at one of the resolution stages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("Kind '{kind}' not found. Available kinds: {}", list_or_none(.available))]
    Kind {
        kind: String,
        available: Vec<String>,
    },

    #[error(
        "Manifest '{kind}'/'{name}' not found. Available names for '{kind}': {}",
        list_or_none(.available)
    )]
    Name {
        kind: String,
        name: String,
        available: Vec<String>,
    },

    #[error(
        "Manifest '{kind}'/'{name}' with apiVersion '{api_version}' not found. \
         Available apiVersions for '{kind}'/'{name}': {}",
        list_or_none(.available)
    )]
    ApiVersion {
        kind: String,
        name: String,
        api_version: String,
        available: Vec<String>,
    },
}

impl NotFoundError {
    /// The alternatives that do exist at the failing stage.
    pub fn available(&self) -> &[String] {
        match self {
            Self::Kind { available, .. }
            | Self::Name { available, .. }
            | Self::ApiVersion { available, .. } => available,
        }
    }
}

/// Errors that can occur while rendering, indexing or querying manifests.
#[derive(Error, Debug, Clone)]
pub enum ManifestError {
    #[error(transparent)]
    TemplateExecution(#[from] RunnerError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(
        "Duplicate manifest detected for apiVersion='{api_version}', kind='{kind}', \
         name='{name}'. Set on_duplicate=ignore to keep the first document."
    )]
    Duplicate {
        api_version: String,
        kind: String,
        name: String,
    },

    #[error("Invalid selector '{selector}'. Expected 'kind/name' or 'apiVersion/kind/name'.")]
    InvalidSelector { selector: String },

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(
        "Manifest '{kind}'/'{name}' is ambiguous across apiVersions: {}. \
         Use 'apiVersion/kind/name'.",
        list_or_none(.candidates)
    )]
    Ambiguous {
        kind: String,
        name: String,
        candidates: Vec<String>,
    },

    #[error("Invalid fixture: {0}")]
    InvalidFixture(String),
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}
