//! # chartest_manifest
//!
//! Rendered Kubernetes manifest parsing and selector lookup for chartest.
//!
//! This crate turns the multi-document YAML printed by a templating command
//! (`helm template ...`) into a [`ManifestIndex`] that tests query by selector
//! instead of walking YAML by hand:
//!
//! - `kind/name` or `apiVersion/kind/name` selectors, case-insensitive
//! - Duplicate detection on `(kind, name, apiVersion)`, or first-wins
//! - Ambiguity errors when one kind/name exists under several apiVersions
//! - Session-cached fixtures that render a chart once
//!
//! ## Example
//!
//! ```rust
//! use chartest_manifest::{parse_manifest_documents, DuplicatePolicy};
//!
//! let rendered = r#"
//! apiVersion: v1
//! kind: ConfigMap
//! metadata:
//!   name: example-config
//! data:
//!   AWS_DEFAULT_REGION: us-east-2
//! ---
//! apiVersion: apps/v1
//! kind: Deployment
//! metadata:
//!   name: example-api
//! spec:
//!   replicas: 2
//! "#;
//!
//! let manifests = parse_manifest_documents(rendered, DuplicatePolicy::Error).unwrap();
//!
//! let config = manifests.get("configmap/example-config").unwrap();
//! assert_eq!(config["data"]["AWS_DEFAULT_REGION"].as_str(), Some("us-east-2"));
//!
//! let deployment = manifests.get("apps/v1/deployment/example-api").unwrap();
//! assert_eq!(deployment.i64_at("spec.replicas"), Some(2));
//! ```

pub mod document;
pub mod error;
pub mod fixture;
pub mod index;
pub mod loader;
pub mod parser;
pub mod policy;
pub mod record;
pub mod selector;

pub use document::Manifest;
pub use error::{ManifestError, ManifestField, ManifestResult, NotFoundError, ParseError};
pub use fixture::ManifestFixture;
pub use index::{KindSummary, ManifestIndex};
pub use loader::{load_manifest, parse_manifest_documents};
pub use parser::parse_documents;
pub use policy::{apply_duplicate_policy, DuplicatePolicy};
pub use record::{DuplicateKey, ManifestRecord};
pub use selector::Selector;
