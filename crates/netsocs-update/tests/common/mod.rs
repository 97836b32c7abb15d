//! Common test infrastructure for netsocs-update tests
//!
//! - constants: repository and binary names used in fixtures
//! - release JSON builders
//! - wiremock helpers for the releases API and asset downloads

#![allow(dead_code)]

use netsocs_core::RuntimeConfig;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const REPO: &str = "Netsocs-Team/netsocs-cli";
pub const BINARY_NAME: &str = "netsocs";
pub const FAKE_BINARY_CONTENT: &[u8] = b"#!/bin/sh\necho netsocs\n";

/// Release JSON as the GitHub API returns it
pub fn release_json(server: &MockServer, tag: &str, assets: &[&str]) -> Value {
    let assets: Vec<Value> = assets
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "browser_download_url": format!("{}/download/{}/{}", server.uri(), tag, name),
                "size": FAKE_BINARY_CONTENT.len(),
            })
        })
        .collect();

    json!({
        "tag_name": tag,
        "name": format!("Release {}", tag),
        "prerelease": false,
        "published_at": "2024-06-01T12:00:00Z",
        "assets": assets,
    })
}

/// Runtime config pointed at the mock server with a temp work dir
pub fn test_config(server: &MockServer) -> (RuntimeConfig, TempDir) {
    let dir = TempDir::new().unwrap();
    let mut config = RuntimeConfig::default();
    config.update.api_url = server.uri();
    config.paths.work_dir = Some(dir.path().join("netsocs"));
    (config, dir)
}

pub async fn mock_latest(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/releases/latest", REPO)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mock_tag(server: &MockServer, tag: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/releases/tags/{}", REPO, tag)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mock_asset(server: &MockServer, tag: &str, name: &str, content: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/download/{}/{}", tag, name)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content))
        .mount(server)
        .await;
}
