//! Self-update functionality for the Netsocs manager CLI
//!
//! Provides:
//! - Release lookup against the GitHub releases API
//! - Binary asset selection (exact name, optional os/arch fallback)
//! - Binary download with progress tracking
//! - A two-phase handoff: [`CliUpdater::prepare`] downloads the binary and
//!   writes the replacement script, [`UpdatePlan::launch`] starts the script
//!   detached and returns without waiting on it

pub mod download;
pub mod platform;
pub mod releases;
pub mod script;
pub mod updater;

pub use download::{BinaryDownloader, DownloadResult};
pub use platform::select_asset;
pub use releases::{Release, ReleaseAsset, ReleaseClient};
pub use updater::{CliUpdater, UpdateHandoff, UpdatePlan};
