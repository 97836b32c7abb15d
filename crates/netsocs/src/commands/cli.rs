//! CLI self-management commands

use anyhow::{Context, Result};
use netsocs_core::RuntimeConfig;
use netsocs_update::CliUpdater;

use crate::cli::CliUpdateArgs;
use crate::commands::mark_in_use;
use crate::output;
use crate::version::VersionInfo;

/// Download a CLI release and hand the swap off to the update script
pub async fn update(args: CliUpdateArgs, config: RuntimeConfig) -> Result<()> {
    let version = args.version.as_deref().map(str::trim).filter(|v| !v.is_empty());
    match version {
        Some(v) => output::info(&format!("Updating CLI to version: {}", v)),
        None => output::info("Updating CLI to the latest version available"),
    }

    let updater = CliUpdater::new(config)?;
    let plan = updater
        .prepare(version)
        .await
        .context("Failed to prepare the CLI update")?;

    output::kv("Release", &plan.tag);
    output::kv("Downloaded", &format!("{} ({} bytes)", plan.binary_path.display(), plan.size));
    output::kv("Install path", &plan.install_path.display().to_string());

    let handoff = plan.launch().context("Failed to start the update script")?;
    output::kv(
        "Update script",
        &format!("{} (pid {})", handoff.script_path.display(), handoff.pid),
    );

    output::success("CLI updated successfully! Please restart the CLI.");
    Ok(())
}

/// List recent CLI releases, marking the running one
pub async fn list_versions(config: RuntimeConfig) -> Result<()> {
    let updater = CliUpdater::new(config)?;

    let spinner = output::spinner("Fetching CLI releases...");
    let versions = updater.list_versions().await;
    spinner.finish_and_clear();
    let versions = versions.context("Failed to list CLI releases")?;

    let current = VersionInfo::current();
    println!("Available CLI versions:");
    for line in mark_in_use(&versions, |tag| current.matches_tag(tag)) {
        println!("{}", line);
    }

    Ok(())
}
