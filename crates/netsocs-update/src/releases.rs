//! GitHub releases API

use std::time::Duration;

use netsocs_core::error::{Error, Result};
use netsocs_core::types::{NetworkConfig, UpdateConfig};
use serde::Deserialize;
use tracing::debug;

/// Release information
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Release tag (e.g., "v1.4.0")
    pub tag_name: String,

    /// Release name
    #[serde(default)]
    pub name: Option<String>,

    /// Whether this is a prerelease
    #[serde(default)]
    pub prerelease: bool,

    /// Release assets
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,

    /// Published date
    #[serde(default)]
    pub published_at: Option<String>,
}

/// Release asset
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    /// Asset name
    pub name: String,

    /// Download URL
    pub browser_download_url: String,

    /// Asset size in bytes
    #[serde(default)]
    pub size: u64,
}

/// Client for the release API of the CLI repository
pub struct ReleaseClient {
    client: reqwest::Client,
    api_url: String,
    repo: String,
}

impl ReleaseClient {
    /// Create a client from the update and network settings
    pub fn new(update: &UpdateConfig, network: &NetworkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&network.user_agent)
            .timeout(Duration::from_secs(network.http_timeout_secs))
            .build()
            .map_err(|e| Error::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: update.api_url.trim_end_matches('/').to_string(),
            repo: update.repo.clone(),
        })
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}/repos/{}/releases{}", self.api_url, self.repo, suffix)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| Error::network(format!("Request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::network(format!(
                "{} returned {}",
                url,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read response from {}: {}", url, e)))?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Get latest release
    pub async fn get_latest(&self) -> Result<Release> {
        self.get_json(&self.url("/latest")).await
    }

    /// Get release by tag
    pub async fn get_release(&self, tag: &str) -> Result<Release> {
        self.get_json(&self.url(&format!("/tags/{}", tag))).await
    }

    /// List releases in the order the API returns them
    pub async fn list_releases(&self) -> Result<Vec<Release>> {
        self.get_json(&self.url("")).await
    }
}
