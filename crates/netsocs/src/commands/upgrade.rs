//! Upgrade command

use anyhow::{Context, Result};
use netsocs_core::RuntimeConfig;
use netsocs_helm::HelmClient;

use crate::cli::UpgradeArgs;
use crate::commands::require_installed;
use crate::output;

pub async fn run(args: UpgradeArgs, config: RuntimeConfig) -> Result<()> {
    let helm = HelmClient::new(config);
    require_installed(&helm).await?;

    let version = args.version.as_deref().map(str::trim).filter(|v| !v.is_empty());
    match version {
        Some(v) => output::info(&format!("Upgrading to version: {}", v)),
        None => output::info("Upgrading to the latest version available"),
    }

    helm.upgrade(version).await.context("Upgrade failed")?;

    output::success("Upgrade completed successfully!");
    Ok(())
}
