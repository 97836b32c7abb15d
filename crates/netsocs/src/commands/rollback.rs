//! Rollback command

use anyhow::{Context, Result};
use netsocs_core::RuntimeConfig;
use netsocs_helm::HelmClient;

use crate::cli::RollbackArgs;
use crate::commands::require_installed;
use crate::output;

pub async fn run(args: RollbackArgs, config: RuntimeConfig) -> Result<()> {
    let helm = HelmClient::new(config);
    require_installed(&helm).await?;

    match args.revision {
        Some(rev) => output::info(&format!("Rolling back to revision: {}", rev)),
        None => output::info("Rolling back to the previous revision"),
    }

    helm.rollback(args.revision).await.context("Rollback failed")?;

    output::success("Rollback completed successfully!");
    Ok(())
}
