//! Helm client
//!
//! Commands that change the release stream their output to the terminal so
//! the operator sees helm's own progress. Listing commands capture stdout
//! and parse it.

use std::fs;
use std::sync::Arc;

use netsocs_core::error::{Error, Result};
use netsocs_core::process::{args, OutputMode, SystemRunner, ToolOutput, ToolRunner};
use netsocs_core::utils::chart_version;
use netsocs_core::RuntimeConfig;
use tracing::{debug, info, warn};

use crate::types::{ChartVersion, HelmRelease, InitOutcome, ReleaseVersion};

/// Helm facade for the Netsocs release
pub struct HelmClient {
    runner: Arc<dyn ToolRunner>,
    config: RuntimeConfig,
}

impl HelmClient {
    /// Create a client that runs the real `helm` binary
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_runner(config, Arc::new(SystemRunner::new()))
    }

    /// Create a client with a custom process runner
    pub fn with_runner(config: RuntimeConfig, runner: Arc<dyn ToolRunner>) -> Self {
        Self { runner, config }
    }

    /// Runtime configuration in use
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    fn binary(&self) -> &str {
        &self.config.helm.binary
    }

    fn release_name(&self) -> &str {
        &self.config.app.name
    }

    async fn run(&self, args: &[String], mode: OutputMode) -> Result<ToolOutput> {
        self.runner.run(self.binary(), args, mode).await
    }

    /// Run and return stdout, failing on non-zero exit
    async fn capture(&self, args: Vec<String>) -> Result<String> {
        let output = self
            .run(&args, OutputMode::Capture)
            .await?
            .into_success(self.binary(), &args)?;
        Ok(output.stdout)
    }

    /// Run with output streamed to the terminal, failing on non-zero exit
    async fn stream(&self, args: Vec<String>) -> Result<()> {
        self.run(&args, OutputMode::Inherit)
            .await?
            .into_success(self.binary(), &args)?;
        Ok(())
    }

    /// Verify helm can be executed
    pub async fn check_installed(&self) -> Result<()> {
        let ok = match self.run(&args(["version"]), OutputMode::Capture).await {
            Ok(output) => output.success,
            Err(e) => {
                debug!("helm version failed: {}", e);
                false
            }
        };

        if ok {
            Ok(())
        } else {
            Err(Error::external_tool(
                self.binary(),
                "Helm is not installed or not accessible",
            ))
        }
    }

    /// Register the chart repository unless `helm repo list` already shows it
    ///
    /// A failing `repo list` counts as an empty list.
    pub async fn ensure_repo_registered(&self) -> Result<()> {
        let repo_name = &self.config.helm.repo_name;

        let listed = match self.run(&args(["repo", "list"]), OutputMode::Capture).await {
            Ok(output) if output.success => output.stdout,
            Ok(output) => {
                warn!("helm repo list failed: {}", output.stderr.trim());
                String::new()
            }
            Err(e) => {
                warn!("helm repo list failed: {}", e);
                String::new()
            }
        };

        if listed.contains(repo_name.as_str()) {
            debug!("Chart repository '{}' already registered", repo_name);
            return Ok(());
        }

        info!(
            "Adding chart repository '{}' ({})",
            repo_name, self.config.helm.repo_url
        );
        self.stream(args([
            "repo",
            "add",
            repo_name.as_str(),
            self.config.helm.repo_url.as_str(),
        ]))
        .await?;
        self.stream(args(["repo", "update"])).await
    }

    /// Write the chart's default values when the values file is missing
    ///
    /// An existing file is left untouched.
    pub async fn ensure_default_values_file(&self) -> Result<()> {
        let path = self.config.values_path()?;
        if path.exists() {
            debug!("Values file present: {}", path.display());
            return Ok(());
        }

        warn!(
            "Values file not found at {}. Creating default file...",
            path.display()
        );
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let chart = self.config.helm.chart.as_str();
        let values = self
            .capture(args(["show", "values", chart]))
            .await
            .map_err(|e| {
                Error::external_tool(
                    self.binary(),
                    format!("error getting default Helm values: {}", e),
                )
            })?;

        fs::write(&path, values)?;
        info!("Created default values file: {}", path.display());
        Ok(())
    }

    /// Whether `helm list` output mentions the release name
    pub async fn is_installed(&self) -> Result<bool> {
        let listed = self.capture(args(["list", "--output", "json"])).await?;
        Ok(listed.contains(self.release_name()))
    }

    /// Releases reported by `helm list --output json`
    pub async fn list_releases(&self) -> Result<Vec<HelmRelease>> {
        let listed = self.capture(args(["list", "--output", "json"])).await?;
        let releases: Vec<HelmRelease> = serde_json::from_str(listed.trim())?;
        debug!("helm list returned {} release(s)", releases.len());
        Ok(releases)
    }

    /// Install the chart under the release name
    pub async fn install(&self, with_values: bool) -> Result<()> {
        let mut argv = args([
            "install",
            self.release_name(),
            self.config.helm.chart.as_str(),
        ]);
        if with_values {
            argv.push("--values".to_string());
            argv.push(self.config.values_path()?.display().to_string());
        }

        info!("Installing {}", self.release_name());
        self.stream(argv).await
    }

    /// Upgrade the release; `None` or an empty version means latest
    ///
    /// The values file is passed when it exists.
    pub async fn upgrade(&self, version: Option<&str>) -> Result<()> {
        let mut argv = args([
            "upgrade",
            self.release_name(),
            self.config.helm.chart.as_str(),
        ]);

        if let Some(v) = version.map(str::trim).filter(|v| !v.is_empty()) {
            argv.push("--version".to_string());
            argv.push(v.to_string());
        }

        let values = self.config.values_path()?;
        if values.exists() {
            argv.push("--values".to_string());
            argv.push(values.display().to_string());
        }

        info!(
            "Upgrading {} to {}",
            self.release_name(),
            version.filter(|v| !v.trim().is_empty()).unwrap_or("latest")
        );
        self.stream(argv).await
    }

    /// Roll back the release; `None` lets helm pick the previous revision
    pub async fn rollback(&self, revision: Option<u32>) -> Result<()> {
        let mut argv = args(["rollback", self.release_name()]);
        if let Some(rev) = revision {
            argv.push(rev.to_string());
        }

        info!("Rolling back {}", self.release_name());
        self.stream(argv).await
    }

    /// Chart currently deployed under the release name
    pub async fn current_version(&self) -> ReleaseVersion {
        match self.list_releases().await {
            Ok(releases) => releases
                .into_iter()
                .find(|r| r.name == self.release_name())
                .map(|r| ReleaseVersion::Installed(r.chart))
                .unwrap_or(ReleaseVersion::NotInstalled),
            Err(e) => {
                warn!("Could not read installed release: {}", e);
                ReleaseVersion::Unknown
            }
        }
    }

    /// Chart versions available in the repository, newest first as helm emits them
    pub async fn list_available_versions(&self) -> Result<Vec<String>> {
        let output = self
            .capture(args([
                "search",
                "repo",
                self.config.helm.chart.as_str(),
                "--versions",
                "--output",
                "json",
            ]))
            .await?;

        let charts: Vec<ChartVersion> = serde_json::from_str(output.trim())?;
        Ok(charts
            .into_iter()
            .take(self.config.helm.versions_limit)
            .map(|c| c.version)
            .collect())
    }

    /// Re-apply the values file without changing the chart version
    pub async fn apply_values(&self) -> Result<()> {
        match self.current_version().await {
            ReleaseVersion::Installed(chart) => {
                self.upgrade(Some(chart_version(&chart, &self.config.helm.chart)))
                    .await
            }
            ReleaseVersion::NotInstalled => Err(Error::validation(format!(
                "release '{}' is not installed",
                self.release_name()
            ))),
            ReleaseVersion::Unknown => Err(Error::external_tool(
                self.binary(),
                "could not determine the installed chart version",
            )),
        }
    }

    /// Prepare helm and install the release if it is missing
    pub async fn initialize(&self) -> Result<InitOutcome> {
        self.check_installed().await?;
        self.ensure_repo_registered().await?;

        if self.is_installed().await? {
            info!("{} is already installed", self.release_name());
            return Ok(InitOutcome::AlreadyInstalled);
        }

        self.ensure_default_values_file().await?;
        self.install(true).await?;
        Ok(InitOutcome::Installed)
    }
}
