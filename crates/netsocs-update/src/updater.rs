//! CLI self-update orchestration

use std::path::PathBuf;
use std::process::{Command, Stdio};

use netsocs_core::error::{Error, Result};
use netsocs_core::RuntimeConfig;
use tracing::{debug, info};

use crate::download::BinaryDownloader;
use crate::platform::select_asset;
use crate::releases::{Release, ReleaseClient};
use crate::script::write_update_script;

/// Phase one of a self-update: binary downloaded, script written
#[derive(Debug, Clone)]
pub struct UpdatePlan {
    /// Release tag being installed
    pub tag: String,

    /// Downloaded binary
    pub binary_path: PathBuf,

    /// Script that performs the swap
    pub script_path: PathBuf,

    /// Where the script installs the binary
    pub install_path: PathBuf,

    /// Downloaded size in bytes
    pub size: u64,
}

/// Phase two: the script was started and left running
#[derive(Debug, Clone)]
pub struct UpdateHandoff {
    pub tag: String,
    pub binary_path: PathBuf,
    pub script_path: PathBuf,
    /// Process id of the detached script
    pub pid: u32,
}

impl UpdatePlan {
    /// Start `bash <script>` detached and return without waiting
    pub fn launch(self) -> Result<UpdateHandoff> {
        self.launch_with("bash")
    }

    /// Start the script with a specific interpreter
    #[allow(clippy::zombie_processes)]
    pub fn launch_with(self, interpreter: &str) -> Result<UpdateHandoff> {
        let mut cmd = Command::new(interpreter);
        cmd.arg(&self.script_path)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let child = cmd.spawn().map_err(|e| {
            Error::external_tool(interpreter, format!("could not start update script: {}", e))
        })?;
        let pid = child.id();
        info!(
            "Update script started (pid {}): {}",
            pid,
            self.script_path.display()
        );

        Ok(UpdateHandoff {
            tag: self.tag,
            binary_path: self.binary_path,
            script_path: self.script_path,
            pid,
        })
    }
}

/// Self-updater for the installed CLI
pub struct CliUpdater {
    config: RuntimeConfig,
    releases: ReleaseClient,
    downloader: BinaryDownloader,
}

impl CliUpdater {
    /// Create an updater from the runtime configuration
    pub fn new(config: RuntimeConfig) -> Result<Self> {
        let releases = ReleaseClient::new(&config.update, &config.network)?;
        let downloader = BinaryDownloader::new(&config.network)?;
        Ok(Self {
            config,
            releases,
            downloader,
        })
    }

    /// Disable the download progress bar
    pub fn without_progress(mut self) -> Self {
        self.downloader = self.downloader.without_progress();
        self
    }

    /// Latest release, or the release tagged `version`
    pub async fn resolve_release(&self, version: Option<&str>) -> Result<Release> {
        match version.map(str::trim).filter(|v| !v.is_empty()) {
            Some(tag) => {
                debug!("Resolving release {}", tag);
                self.releases.get_release(tag).await
            }
            None => {
                debug!("Resolving latest release");
                self.releases.get_latest().await
            }
        }
    }

    /// Download the binary and write the update script
    pub async fn prepare(&self, version: Option<&str>) -> Result<UpdatePlan> {
        let release = self.resolve_release(version).await?;
        let update = &self.config.update;

        let asset = select_asset(&release, &update.binary_name, update.platform_fallback)
            .ok_or_else(|| Error::asset_not_found(&release.tag_name, &update.binary_name))?;

        let binary_path = self.config.download_path()?;
        let downloaded = self.downloader.download(asset, &binary_path).await?;

        let script_path = self.config.update_script_path()?;
        write_update_script(&script_path, &binary_path, &update.install_path)?;

        info!("Prepared update to {}", release.tag_name);
        Ok(UpdatePlan {
            tag: release.tag_name,
            binary_path,
            script_path,
            install_path: update.install_path.clone(),
            size: downloaded.file_size,
        })
    }

    /// Release tags, newest first as the API lists them
    pub async fn list_versions(&self) -> Result<Vec<String>> {
        let releases = self.releases.list_releases().await?;
        Ok(releases
            .into_iter()
            .take(self.config.update.versions_limit)
            .map(|r| r.tag_name)
            .collect())
    }
}
