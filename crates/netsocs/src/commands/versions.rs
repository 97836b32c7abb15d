//! List-versions command

use anyhow::{Context, Result};
use netsocs_core::RuntimeConfig;
use netsocs_helm::HelmClient;

use crate::commands::{mark_in_use, NOT_INSTALLED_MESSAGE};
use crate::output;

pub async fn run(config: RuntimeConfig) -> Result<()> {
    let chart_ref = config.helm.chart.clone();
    let helm = HelmClient::new(config);

    let deployed = helm.current_version().await;
    if deployed.is_not_installed() {
        anyhow::bail!(NOT_INSTALLED_MESSAGE);
    }

    let spinner = output::spinner("Fetching chart versions...");
    let versions = helm.list_available_versions().await;
    spinner.finish_and_clear();
    let versions = versions.context("Failed to list chart versions")?;

    if versions.is_empty() {
        output::warning("No chart versions found");
        return Ok(());
    }

    let current = deployed.version_for(&chart_ref);
    println!("Available versions:");
    for line in mark_in_use(&versions, |v| Some(v) == current) {
        println!("{}", line);
    }

    Ok(())
}
