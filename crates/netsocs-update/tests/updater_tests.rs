//! Self-update tests against a mocked releases API

mod common;

use std::fs;

use common::*;
use netsocs_core::Error;
use netsocs_update::{CliUpdater, ReleaseClient};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_prepare_latest_picks_exact_asset() {
    let server = MockServer::start().await;
    let (config, _dir) = test_config(&server);

    mock_latest(&server, release_json(&server, "v1.5.0", &["other", BINARY_NAME])).await;
    mock_asset(&server, "v1.5.0", BINARY_NAME, FAKE_BINARY_CONTENT).await;
    Mock::given(method("GET"))
        .and(path("/download/v1.5.0/other"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let updater = CliUpdater::new(config.clone()).unwrap().without_progress();
    let plan = updater.prepare(None).await.unwrap();

    assert_eq!(plan.tag, "v1.5.0");
    assert_eq!(plan.binary_path, config.download_path().unwrap());
    assert_eq!(fs::read(&plan.binary_path).unwrap(), FAKE_BINARY_CONTENT);
    assert_eq!(plan.size, FAKE_BINARY_CONTENT.len() as u64);

    let script = fs::read_to_string(&plan.script_path).unwrap();
    assert!(script.contains(&plan.binary_path.display().to_string()));
    assert!(script.contains("/usr/local/bin/netsocs"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&plan.binary_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}

#[tokio::test]
async fn test_prepare_specific_tag() {
    let server = MockServer::start().await;
    let (config, _dir) = test_config(&server);

    mock_tag(&server, "v1.2.0", release_json(&server, "v1.2.0", &[BINARY_NAME])).await;
    mock_asset(&server, "v1.2.0", BINARY_NAME, b"old build").await;

    let updater = CliUpdater::new(config).unwrap().without_progress();
    let plan = updater.prepare(Some("v1.2.0")).await.unwrap();

    assert_eq!(plan.tag, "v1.2.0");
    assert_eq!(fs::read(&plan.binary_path).unwrap(), b"old build");
}

#[tokio::test]
async fn test_prepare_truncates_previous_download() {
    let server = MockServer::start().await;
    let (config, _dir) = test_config(&server);
    let previous = config.download_path().unwrap();
    fs::create_dir_all(previous.parent().unwrap()).unwrap();
    fs::write(&previous, vec![b'x'; 4096]).unwrap();

    mock_latest(&server, release_json(&server, "v2.0.0", &[BINARY_NAME])).await;
    mock_asset(&server, "v2.0.0", BINARY_NAME, b"new").await;

    let updater = CliUpdater::new(config).unwrap().without_progress();
    let plan = updater.prepare(None).await.unwrap();

    assert_eq!(fs::read(&plan.binary_path).unwrap(), b"new");
}

#[tokio::test]
async fn test_prepare_without_suitable_asset() {
    let server = MockServer::start().await;
    let (mut config, _dir) = test_config(&server);
    config.update.platform_fallback = false;

    mock_latest(
        &server,
        release_json(&server, "v1.5.0", &["checksums.txt", "netsocs-linux-amd64"]),
    )
    .await;

    let updater = CliUpdater::new(config.clone()).unwrap().without_progress();
    let err = updater.prepare(None).await.unwrap_err();

    assert!(matches!(err, Error::AssetNotFound { .. }));
    assert!(err.to_string().contains("No suitable binary found"));
    assert!(!config.download_path().unwrap().exists());
}

#[tokio::test]
async fn test_unknown_tag_is_network_error() {
    let server = MockServer::start().await;
    let (config, _dir) = test_config(&server);

    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/releases/tags/v9.9.9", REPO)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let updater = CliUpdater::new(config).unwrap().without_progress();
    let err = updater.prepare(Some("v9.9.9")).await.unwrap_err();
    assert!(matches!(err, Error::Network { .. }));
}

#[tokio::test]
async fn test_failed_asset_download() {
    let server = MockServer::start().await;
    let (config, _dir) = test_config(&server);

    mock_latest(&server, release_json(&server, "v1.5.0", &[BINARY_NAME])).await;
    Mock::given(method("GET"))
        .and(path("/download/v1.5.0/netsocs"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let updater = CliUpdater::new(config.clone()).unwrap().without_progress();
    let err = updater.prepare(None).await.unwrap_err();

    assert!(matches!(err, Error::Network { .. }));
    assert!(!config.update_script_path().unwrap().exists());
}

#[tokio::test]
async fn test_list_versions_first_ten() {
    let server = MockServer::start().await;
    let (config, _dir) = test_config(&server);

    let releases: Vec<_> = (0..15)
        .rev()
        .map(|i| release_json(&server, &format!("v1.{}.0", i), &[BINARY_NAME]))
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/releases", REPO)))
        .respond_with(ResponseTemplate::new(200).set_body_json(releases))
        .mount(&server)
        .await;

    let updater = CliUpdater::new(config).unwrap();
    let versions = updater.list_versions().await.unwrap();

    assert_eq!(versions.len(), 10);
    assert_eq!(versions.first().map(String::as_str), Some("v1.14.0"));
    assert_eq!(versions.last().map(String::as_str), Some("v1.5.0"));
}

#[tokio::test]
async fn test_release_client_parses_assets() {
    let server = MockServer::start().await;
    let (config, _dir) = test_config(&server);
    mock_latest(&server, release_json(&server, "v3.0.0", &["a", "b"])).await;

    let client = ReleaseClient::new(&config.update, &config.network).unwrap();
    let release = client.get_latest().await.unwrap();

    assert_eq!(release.assets.len(), 2);
    assert!(release.assets[1]
        .browser_download_url
        .ends_with("/download/v3.0.0/b"));
}

#[cfg(unix)]
#[test]
fn test_launch_returns_without_waiting() {
    use netsocs_update::UpdatePlan;

    let dir = tempfile::TempDir::new().unwrap();
    let script = dir.path().join("update.sh");
    let marker = dir.path().join("ran");
    fs::write(&script, format!("touch \"{}\"\n", marker.display())).unwrap();

    let plan = UpdatePlan {
        tag: "v1.0.0".to_string(),
        binary_path: dir.path().join("netsocs.new"),
        script_path: script.clone(),
        install_path: dir.path().join("netsocs"),
        size: 0,
    };

    let handoff = plan.launch_with("sh").unwrap();
    assert!(handoff.pid > 0);
    assert_eq!(handoff.script_path, script);

    // The detached script finishes on its own; wait for its side effect
    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
    while !marker.exists() && std::time::Instant::now() < deadline {
        std::thread::sleep(std::time::Duration::from_millis(20));
    }
    assert!(marker.exists(), "update script did not run");
}
