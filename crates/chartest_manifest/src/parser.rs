//! Multi-document YAML parsing into manifest records.

use serde::Deserialize;
use serde_yaml::{Deserializer, Mapping, Value};
use tracing::debug;

use crate::document::Manifest;
use crate::error::{ManifestField, ParseError};
use crate::record::ManifestRecord;

/// Parse a rendered YAML stream into records, in document order.
///
/// Empty documents (a bare `---`, or one holding only comments as helm emits
/// for templates that render nothing) are skipped but still counted for the
/// document ordinal used in error messages.
pub fn parse_documents(text: &str) -> Result<Vec<ManifestRecord>, ParseError> {
    let mut records = Vec::new();

    for (index, document) in Deserializer::from_str(text).enumerate() {
        let ordinal = index + 1;
        let invalid = |e: serde_yaml::Error| ParseError::InvalidYaml {
            document: ordinal,
            message: e.to_string(),
        };
        let mut value = Value::deserialize(document).map_err(invalid)?;
        value.apply_merge().map_err(invalid)?;

        if value.is_null() {
            debug!("Skipping empty YAML document #{}", ordinal);
            continue;
        }

        let record = parse_record(ordinal, value)?;
        debug!(
            "Parsed document #{}: {}/{} ({})",
            ordinal,
            record.kind(),
            record.name(),
            record.api_version()
        );
        records.push(record);
    }

    Ok(records)
}

fn parse_record(ordinal: usize, value: Value) -> Result<ManifestRecord, ParseError> {
    let Value::Mapping(mapping) = &value else {
        return Err(ParseError::NotAMapping { document: ordinal });
    };

    let missing = |field| ParseError::MissingField {
        document: ordinal,
        field,
    };

    let api_version =
        identity_field(mapping.get("apiVersion")).ok_or_else(|| missing(ManifestField::ApiVersion))?;
    let kind = identity_field(mapping.get("kind")).ok_or_else(|| missing(ManifestField::Kind))?;
    let name = identity_field(metadata_name(mapping))
        .ok_or_else(|| missing(ManifestField::MetadataName))?;

    let (api_version, kind, name) = (api_version.to_string(), kind.to_string(), name.to_string());
    Ok(ManifestRecord::new(api_version, kind, name, Manifest::new(value)))
}

fn metadata_name(mapping: &Mapping) -> Option<&Value> {
    mapping
        .get("metadata")
        .and_then(Value::as_mapping)
        .and_then(|metadata| metadata.get("name"))
}

/// A present, string-typed, non-empty field.
fn identity_field(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_in_document_order() {
        let records = parse_documents(
            r#"
apiVersion: v1
kind: ConfigMap
metadata:
  name: example-config
data:
  AWS_DEFAULT_REGION: us-east-2
---
apiVersion: apps/v1
kind: Deployment
metadata:
  name: example-api
spec:
  replicas: 2
"#,
        )
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind(), "ConfigMap");
        assert_eq!(records[0].name(), "example-config");
        assert_eq!(records[0].api_version(), "v1");
        assert_eq!(records[1].kind(), "Deployment");
        assert_eq!(records[1].manifest().i64_at("spec.replicas"), Some(2));
    }

    #[test]
    fn test_skips_empty_documents() {
        let records = parse_documents(
            r#"---
# Source: chart/templates/empty.yaml
---
apiVersion: v1
kind: Service
metadata:
  name: web
---
"#,
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "web");
    }

    #[test]
    fn test_empty_input_has_no_records() {
        assert!(parse_documents("").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_mapping_document() {
        let err = parse_documents(
            r#"
apiVersion: v1
kind: Service
metadata:
  name: web
---
- just
- a list
"#,
        )
        .unwrap_err();

        assert_eq!(err, ParseError::NotAMapping { document: 2 });
    }

    #[test]
    fn test_empty_documents_count_towards_ordinal() {
        let err = parse_documents("---\n---\nplain scalar\n").unwrap_err();
        assert_eq!(err, ParseError::NotAMapping { document: 2 });

        let err = parse_documents("---\n# Source: x\n---\n- a\n").unwrap_err();
        assert_eq!(err, ParseError::NotAMapping { document: 2 });
    }

    #[test]
    fn test_expands_merge_keys() {
        let records = parse_documents(
            r#"
base: &base
  name: merged
  labels:
    app: web
apiVersion: v1
kind: Service
metadata:
  <<: *base
"#,
        )
        .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "merged");
        assert_eq!(
            records[0].manifest().str_at("metadata.labels.app"),
            Some("web")
        );
        assert!(records[0].manifest().at("metadata.<<").is_none());
    }

    #[test]
    fn test_missing_api_version() {
        let err = parse_documents("kind: Service\nmetadata:\n  name: no-api-version\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingField {
                document: 1,
                field: ManifestField::ApiVersion
            }
        );
        assert!(err.to_string().contains("missing non-empty 'apiVersion'"));
    }

    #[test]
    fn test_missing_kind() {
        let err = parse_documents("apiVersion: v1\nmetadata:\n  name: no-kind\n").unwrap_err();
        assert!(err.to_string().contains("missing non-empty 'kind'"));
    }

    #[test]
    fn test_missing_metadata_name() {
        for text in [
            "apiVersion: v1\nkind: Service\nmetadata: {}\n",
            "apiVersion: v1\nkind: Service\n",
            "apiVersion: v1\nkind: Service\nmetadata: not-a-mapping\n",
            "apiVersion: v1\nkind: Service\nmetadata:\n  name: ''\n",
        ] {
            let err = parse_documents(text).unwrap_err();
            assert!(
                err.to_string().contains("missing non-empty 'metadata.name'"),
                "unexpected error for {text:?}: {err}"
            );
        }
    }

    #[test]
    fn test_non_string_identity_is_missing() {
        let err = parse_documents("apiVersion: 1\nkind: Service\nmetadata:\n  name: web\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingField {
                document: 1,
                field: ManifestField::ApiVersion
            }
        );
    }

    #[test]
    fn test_error_names_failing_document_only() {
        let err = parse_documents(
            r#"
apiVersion: v1
kind: Service
metadata:
  name: fine
---
apiVersion: v1
metadata:
  name: broken
"#,
        )
        .unwrap_err();

        assert_eq!(
            err,
            ParseError::MissingField {
                document: 2,
                field: ManifestField::Kind
            }
        );
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse_documents("apiVersion: v1\nkind: [unterminated\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidYaml { document: 1, .. }));
    }
}
