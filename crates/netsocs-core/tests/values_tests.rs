//! Integration tests for dotted-path updates of the values file

use std::fs;

use netsocs_core::values::update_field;
use netsocs_core::{ChartValues, Error};
use serde_yaml_ng::Value;
use tempfile::TempDir;

const VALUES: &str = r#"
httpHostname: https://old.example.com
replicaCount: 2
ingress:
  enabled: true
  tls:
    secretName: netsocs-tls
image:
  tag: "1.4.0"
  pullPolicy: IfNotPresent
"#;

fn write_values(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("values.yaml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_update_top_level_keeps_siblings() {
    let dir = TempDir::new().unwrap();
    let path = write_values(&dir, VALUES);

    update_field(&path, "httpHostname", "https://192.168.1.50").unwrap();

    let doc = ChartValues::load(&path).unwrap();
    assert_eq!(
        doc.get("httpHostname"),
        Some(&Value::from("https://192.168.1.50"))
    );
    assert_eq!(doc.get("replicaCount"), Some(&Value::from(2)));
    assert_eq!(doc.get("ingress.enabled"), Some(&Value::from(true)));
    assert_eq!(
        doc.get("ingress.tls.secretName"),
        Some(&Value::from("netsocs-tls"))
    );
    assert_eq!(doc.get("image.tag"), Some(&Value::from("1.4.0")));
}

#[test]
fn test_update_nested_creates_intermediates() {
    let dir = TempDir::new().unwrap();
    let path = write_values(&dir, VALUES);

    update_field(&path, "monitoring.grafana.enabled", true).unwrap();

    let doc = ChartValues::load(&path).unwrap();
    assert_eq!(
        doc.get("monitoring.grafana.enabled"),
        Some(&Value::from(true))
    );
    assert_eq!(doc.get("image.pullPolicy"), Some(&Value::from("IfNotPresent")));
}

#[test]
fn test_scalar_intermediate_is_replaced() {
    let dir = TempDir::new().unwrap();
    let path = write_values(&dir, VALUES);

    update_field(&path, "replicaCount.min", 1).unwrap();

    let doc = ChartValues::load(&path).unwrap();
    assert_eq!(doc.get("replicaCount.min"), Some(&Value::from(1)));
    assert!(doc.get("replicaCount").unwrap().is_mapping());
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("values.yaml");

    let err = update_field(&path, "httpHostname", "https://a.example.com").unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
    assert!(!path.exists());
}

#[test]
fn test_malformed_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_values(&dir, "ingress: [unclosed\n");

    let err = update_field(&path, "httpHostname", "x").unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(fs::read_to_string(&path).unwrap(), "ingress: [unclosed\n");
}

#[test]
fn test_empty_file_becomes_mapping() {
    let dir = TempDir::new().unwrap();
    let path = write_values(&dir, "");

    update_field(&path, "httpHostname", "https://netsocs.local").unwrap();

    let doc = ChartValues::load(&path).unwrap();
    assert_eq!(doc.root().len(), 1);
}

#[test]
fn test_empty_segment_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_values(&dir, VALUES);

    let err = update_field(&path, "ingress..enabled", false).unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}
