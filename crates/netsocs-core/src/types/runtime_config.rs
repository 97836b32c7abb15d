//! Runtime configuration types
//!
//! Every endpoint, path and constant the facades need lives here and is
//! handed to them explicitly; nothing reads module-level constants.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::get_home_dir;

/// Complete runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Deployed application identity
    #[serde(default)]
    pub app: AppConfig,

    /// Helm repository and chart
    #[serde(default)]
    pub helm: HelmConfig,

    /// Cluster inspection tool
    #[serde(default)]
    pub kube: KubeConfig,

    /// Well-known files under the work directory
    #[serde(default)]
    pub paths: PathsConfig,

    /// CLI self-update settings
    #[serde(default)]
    pub update: UpdateConfig,

    /// HTTP and connectivity settings
    #[serde(default)]
    pub network: NetworkConfig,
}

/// Deployed application identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AppConfig {
    /// Helm release name
    #[serde(default = "default_app_name")]
    pub name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
        }
    }
}

fn default_app_name() -> String {
    "netsocs".to_string()
}

/// Helm repository and chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HelmConfig {
    /// Helm binary name or path
    #[serde(default = "default_helm_binary")]
    pub binary: String,

    /// Name the chart repository is registered under
    #[serde(default = "default_repo_name")]
    pub repo_name: String,

    /// Chart repository URL
    #[serde(default = "default_repo_url")]
    pub repo_url: String,

    /// Chart reference (`<repo>/<chart>`)
    #[serde(default = "default_chart")]
    pub chart: String,

    /// Maximum number of chart versions listed
    #[serde(default = "default_list_limit")]
    pub versions_limit: usize,
}

impl Default for HelmConfig {
    fn default() -> Self {
        Self {
            binary: default_helm_binary(),
            repo_name: default_repo_name(),
            repo_url: default_repo_url(),
            chart: default_chart(),
            versions_limit: default_list_limit(),
        }
    }
}

fn default_helm_binary() -> String {
    "helm".to_string()
}
fn default_repo_name() -> String {
    "netsocs".to_string()
}
fn default_repo_url() -> String {
    "https://netsocs-team.github.io/netsocs-helm-chart/".to_string()
}
fn default_chart() -> String {
    "netsocs/netsocs-helm-chart".to_string()
}
fn default_list_limit() -> usize {
    10
}

/// Cluster inspection tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct KubeConfig {
    /// kubectl binary name or path
    #[serde(default = "default_kubectl_binary")]
    pub binary: String,
}

impl Default for KubeConfig {
    fn default() -> Self {
        Self {
            binary: default_kubectl_binary(),
        }
    }
}

fn default_kubectl_binary() -> String {
    "kubectl".to_string()
}

/// Well-known files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PathsConfig {
    /// Work directory; `~/netsocs` when unset
    #[serde(default)]
    pub work_dir: Option<PathBuf>,

    /// Values file name inside the work directory
    #[serde(default = "default_values_file")]
    pub values_file: String,

    /// Downloaded CLI binary name inside the work directory
    #[serde(default = "default_download_file")]
    pub download_file: String,

    /// Update script name inside the work directory
    #[serde(default = "default_update_script")]
    pub update_script: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            work_dir: None,
            values_file: default_values_file(),
            download_file: default_download_file(),
            update_script: default_update_script(),
        }
    }
}

fn default_values_file() -> String {
    "values.yaml".to_string()
}
fn default_download_file() -> String {
    "netsocs.new".to_string()
}
fn default_update_script() -> String {
    "update.sh".to_string()
}

/// CLI self-update settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateConfig {
    /// Base URL of the release API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Repository publishing CLI releases (`owner/name`)
    #[serde(default = "default_release_repo")]
    pub repo: String,

    /// Asset name of the CLI binary
    #[serde(default = "default_binary_name")]
    pub binary_name: String,

    /// System path the CLI is installed at
    #[serde(default = "default_install_path")]
    pub install_path: PathBuf,

    /// Fall back to an os/arch-named asset when no exact match exists
    #[serde(default = "default_platform_fallback")]
    pub platform_fallback: bool,

    /// Maximum number of CLI releases listed
    #[serde(default = "default_list_limit")]
    pub versions_limit: usize,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            repo: default_release_repo(),
            binary_name: default_binary_name(),
            install_path: default_install_path(),
            platform_fallback: default_platform_fallback(),
            versions_limit: default_list_limit(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}
fn default_release_repo() -> String {
    "Netsocs-Team/netsocs-cli".to_string()
}
fn default_binary_name() -> String {
    "netsocs".to_string()
}
fn default_install_path() -> PathBuf {
    PathBuf::from("/usr/local/bin/netsocs")
}
fn default_platform_fallback() -> bool {
    true
}

/// HTTP and connectivity settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// Per-request timeout for API calls and connectivity checks
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Timeout for binary downloads
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,

    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Endpoints probed by the connectivity check
    #[serde(default = "default_connectivity_endpoints")]
    pub connectivity_endpoints: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: default_http_timeout(),
            download_timeout_secs: default_download_timeout(),
            user_agent: default_user_agent(),
            connectivity_endpoints: default_connectivity_endpoints(),
        }
    }
}

fn default_http_timeout() -> u64 {
    10
}
fn default_download_timeout() -> u64 {
    300 // 5 minutes
}
fn default_user_agent() -> String {
    format!(
        "netsocs-manager/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
fn default_connectivity_endpoints() -> Vec<String> {
    [
        "https://netsocs.com",
        "https://netsocs-team.github.io/netsocs-helm-chart",
        "https://ghcr.io",
        "https://plugins.traefik.io",
        "http://github.com/",
        "https://hub.docker.com/",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl RuntimeConfig {
    /// Resolved work directory
    pub fn work_dir(&self) -> Result<PathBuf> {
        match &self.paths.work_dir {
            Some(dir) => Ok(dir.clone()),
            None => get_home_dir()
                .map(|home| home.join("netsocs"))
                .map_err(|e| Error::invalid_config(e.to_string())),
        }
    }

    /// Path of the chart values file
    pub fn values_path(&self) -> Result<PathBuf> {
        Ok(self.work_dir()?.join(&self.paths.values_file))
    }

    /// Path the new CLI binary is downloaded to
    pub fn download_path(&self) -> Result<PathBuf> {
        Ok(self.work_dir()?.join(&self.paths.download_file))
    }

    /// Path of the generated update script
    pub fn update_script_path(&self) -> Result<PathBuf> {
        Ok(self.work_dir()?.join(&self.paths.update_script))
    }
}
