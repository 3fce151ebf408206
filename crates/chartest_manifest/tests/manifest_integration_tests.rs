//! Integration tests for manifest parsing and selector lookup.

use std::sync::Arc;

use chartest_manifest::{
    parse_manifest_documents, DuplicatePolicy, ManifestError, ManifestFixture, NotFoundError,
};
use chartest_runner::{MockResponse, MockRunner};

const CONFIG_AND_DEPLOYMENT: &str = r#"
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
"#;

const DUPLICATE_CONFIG_MAPS: &str = r#"
apiVersion: v1
kind: ConfigMap
metadata:
  name: duplicate
data:
  A: one
---
apiVersion: v1
kind: ConfigMap
metadata:
  name: duplicate
data:
  A: two
"#;

const TWO_API_VERSIONS: &str = r#"
apiVersion: extensions/v1beta1
kind: Deployment
metadata:
  name: release-name
spec:
  replicas: 1
---
apiVersion: apps/v1
kind: Deployment
metadata:
  name: release-name
spec:
  replicas: 2
"#;

#[test]
fn test_indexes_by_selector() {
    let manifests = parse_manifest_documents(CONFIG_AND_DEPLOYMENT, DuplicatePolicy::Error).unwrap();

    let config = manifests.get("configmap/example-config").unwrap();
    let deployment = manifests.get("apps/v1/deployment/example-api").unwrap();

    assert_eq!(config.str_at("data.AWS_DEFAULT_REGION"), Some("us-east-2"));
    assert_eq!(deployment["spec"]["replicas"].as_i64(), Some(2));
}

#[test]
fn test_lookup_is_case_insensitive() {
    let manifests = parse_manifest_documents(CONFIG_AND_DEPLOYMENT, DuplicatePolicy::Error).unwrap();

    let lower = manifests.get("deployment/example-api").unwrap();
    let upper = manifests.get("APPS/V1/DEPLOYMENT/EXAMPLE-API").unwrap();
    let mixed = manifests.get("Deployment/Example-Api").unwrap();

    assert!(std::ptr::eq(lower, upper));
    assert!(std::ptr::eq(lower, mixed));

    let padded = manifests.get("  deployment/example-api  ").unwrap();
    assert!(std::ptr::eq(lower, padded));
}

#[test]
fn test_debug_lists_kinds_and_names() {
    let manifests = parse_manifest_documents(CONFIG_AND_DEPLOYMENT, DuplicatePolicy::Error).unwrap();

    assert_eq!(
        format!("{:?}", manifests),
        r#"ManifestIndex({"ConfigMap": ["example-config"], "Deployment": ["example-api"]})"#
    );
}

#[test]
fn test_selector_requires_two_segments() {
    let manifests = parse_manifest_documents(CONFIG_AND_DEPLOYMENT, DuplicatePolicy::Error).unwrap();

    let err = manifests.get("Deployment").unwrap_err();
    assert!(matches!(err, ManifestError::InvalidSelector { .. }));
    assert!(err
        .to_string()
        .contains("Expected 'kind/name' or 'apiVersion/kind/name'"));
}

#[test]
fn test_missing_values_report_each_stage() {
    let manifests = parse_manifest_documents(CONFIG_AND_DEPLOYMENT, DuplicatePolicy::Error).unwrap();

    let err = manifests.get("apps/v1/service/example-api").unwrap_err();
    assert!(matches!(err, ManifestError::NotFound(NotFoundError::Kind { .. })));
    assert!(err.to_string().contains("Kind 'service' not found"));
    assert!(err.to_string().contains("Available kinds: ConfigMap, Deployment"));

    let err = manifests.get("apps/v1/deployment/missing").unwrap_err();
    assert!(matches!(err, ManifestError::NotFound(NotFoundError::Name { .. })));
    assert!(err
        .to_string()
        .contains("Manifest 'deployment'/'missing' not found"));

    let err = manifests.get("v1/deployment/example-api").unwrap_err();
    assert!(matches!(
        err,
        ManifestError::NotFound(NotFoundError::ApiVersion { .. })
    ));
    assert!(err.to_string().contains("with apiVersion 'v1' not found"));
}

#[test]
fn test_duplicates_error_by_default() {
    let err = parse_manifest_documents(DUPLICATE_CONFIG_MAPS, DuplicatePolicy::Error).unwrap_err();
    assert!(matches!(err, ManifestError::Duplicate { .. }));
    assert!(err.to_string().contains("Duplicate manifest detected"));
    assert!(err.to_string().contains("kind='ConfigMap', name='duplicate'"));
}

#[test]
fn test_duplicates_can_be_ignored() {
    let manifests = parse_manifest_documents(DUPLICATE_CONFIG_MAPS, DuplicatePolicy::Ignore).unwrap();

    assert_eq!(manifests.len(), 1);
    assert_eq!(
        manifests.get("v1/configmap/duplicate").unwrap().str_at("data.A"),
        Some("one")
    );
}

#[test]
fn test_case_only_variants_are_duplicates() {
    let text = r#"
apiVersion: APPS/v1
kind: Deployment
metadata:
  name: API
spec: {}
---
apiVersion: apps/V1
kind: deployment
metadata:
  name: api
spec: {}
"#;

    let err = parse_manifest_documents(text, DuplicatePolicy::Error).unwrap_err();
    assert!(matches!(err, ManifestError::Duplicate { .. }));
}

#[test]
fn test_multiple_api_versions_require_versioned_lookup() {
    let manifests = parse_manifest_documents(TWO_API_VERSIONS, DuplicatePolicy::Error).unwrap();

    let err = manifests.get("deployment/release-name").unwrap_err();
    assert!(matches!(err, ManifestError::Ambiguous { .. }));
    assert!(err.to_string().contains("Use 'apiVersion/kind/name'"));
    assert!(err
        .to_string()
        .contains("apps/v1, extensions/v1beta1"));

    let old = manifests
        .get("extensions/v1beta1/deployment/release-name")
        .unwrap();
    let new = manifests.get("apps/v1/deployment/release-name").unwrap();
    assert_eq!(old.i64_at("spec.replicas"), Some(1));
    assert_eq!(new.i64_at("spec.replicas"), Some(2));
}

#[test]
fn test_missing_identity_fields() {
    let cases = [
        ("kind: Service\nmetadata:\n  name: no-api-version\n", "'apiVersion'"),
        ("apiVersion: v1\nmetadata:\n  name: no-kind\n", "'kind'"),
        ("apiVersion: v1\nkind: Service\nmetadata: {}\n", "'metadata.name'"),
    ];

    for (text, field) in cases {
        let err = parse_manifest_documents(text, DuplicatePolicy::Error).unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
        assert!(
            err.to_string().contains(&format!("missing non-empty {field}")),
            "unexpected message: {err}"
        );
    }
}

#[test]
fn test_fixture_renders_once() {
    let runner = MockRunner::new().add_response(MockResponse::success(TWO_API_VERSIONS));
    let fixture = ManifestFixture::new("chart_manifest", ["helm", "template", "."])
        .unwrap()
        .with_runner(Arc::new(runner.clone()));

    for _ in 0..3 {
        let manifests = fixture.get().unwrap();
        assert_eq!(manifests.len(), 2);
    }
    assert_eq!(runner.call_count(), 1);
}

#[test]
fn test_fixture_reports_template_failure() {
    let runner = MockRunner::new().add_response(MockResponse::failure(1, "Error: chart not found"));
    let fixture = ManifestFixture::new("chart_manifest", ["helm", "template", "missing"])
        .unwrap()
        .with_runner(Arc::new(runner));

    let err = fixture.get().unwrap_err();
    assert!(matches!(err, ManifestError::TemplateExecution(_)));
    assert!(err.to_string().contains("exit code 1"));
    assert!(err.to_string().contains("Error: chart not found"));
}

#[cfg(unix)]
#[test]
fn test_fixture_with_process_runner() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("rendered.yaml"), CONFIG_AND_DEPLOYMENT).unwrap();

    let fixture = ManifestFixture::new("from_file", ["cat", "rendered.yaml"])
        .unwrap()
        .workdir(dir.path());

    let manifests = fixture.get().unwrap();
    assert_eq!(
        manifests
            .get("configmap/example-config")
            .unwrap()
            .str_at("data.AWS_DEFAULT_REGION"),
        Some("us-east-2")
    );
}
