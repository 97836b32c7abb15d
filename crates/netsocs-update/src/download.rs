//! Binary download with progress tracking

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use netsocs_core::error::{Error, Result};
use netsocs_core::types::NetworkConfig;
use reqwest::header::CONTENT_LENGTH;
use tracing::{debug, info};

use crate::releases::ReleaseAsset;

/// Result of a download operation
#[derive(Debug)]
pub struct DownloadResult {
    /// Path to the downloaded file
    pub file_path: PathBuf,

    /// Size of the downloaded file in bytes
    pub file_size: u64,
}

/// Streams release assets to disk
pub struct BinaryDownloader {
    client: reqwest::Client,
    show_progress: bool,
}

impl BinaryDownloader {
    /// Create a downloader using the download timeout from `network`
    pub fn new(network: &NetworkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&network.user_agent)
            .timeout(Duration::from_secs(network.download_timeout_secs))
            .build()
            .map_err(|e| Error::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            show_progress: true,
        })
    }

    /// Disable the progress bar
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Download `asset` to `dest`, replacing any previous file
    ///
    /// The parent directory is created and the file is marked executable.
    pub async fn download(&self, asset: &ReleaseAsset, dest: &Path) -> Result<DownloadResult> {
        let url = &asset.browser_download_url;
        info!("Downloading {} from {}", asset.name, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::network(format!("Failed to download {}: {}", asset.name, e)))?;

        if !response.status().is_success() {
            return Err(Error::network(format!(
                "Download failed with status: {}",
                response.status()
            )));
        }

        let total_size = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|ct| ct.to_str().ok())
            .and_then(|ct| ct.parse::<u64>().ok())
            .unwrap_or(asset.size);

        let progress = if self.show_progress {
            let pb = ProgressBar::new(total_size);
            if let Ok(style) = ProgressStyle::default_bar().template(
                "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
            ) {
                pb.set_style(style.progress_chars("#>-"));
            }
            pb.set_message(format!("Downloading {}", asset.name));
            Some(pb)
        } else {
            None
        };

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(dest)?;

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result
                .map_err(|e| Error::network(format!("Failed to read download chunk: {}", e)))?;
            file.write_all(&chunk)?;
            downloaded += chunk.len() as u64;

            if let Some(pb) = &progress {
                pb.set_position(downloaded);
            }
        }
        file.flush()?;
        drop(file);

        if let Some(pb) = progress {
            pb.finish_with_message(format!("Downloaded {}", asset.name));
        }

        make_executable(dest)?;
        debug!("Wrote {} bytes to {}", downloaded, dest.display());

        Ok(DownloadResult {
            file_path: dest.to_path_buf(),
            file_size: downloaded,
        })
    }
}

/// Set mode 0755
#[cfg(unix)]
pub(crate) fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
pub(crate) fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
