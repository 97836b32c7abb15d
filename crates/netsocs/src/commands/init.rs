//! Init command

use anyhow::Result;
use netsocs_core::RuntimeConfig;
use netsocs_doctor::ConnectivityChecker;
use netsocs_helm::{HelmClient, InitOutcome};

use crate::cli::InitArgs;
use crate::commands::doctor::show_connectivity;
use crate::output;

pub async fn run(args: InitArgs, config: RuntimeConfig) -> Result<()> {
    output::banner();

    if !args.skip_network_check {
        let checker = ConnectivityChecker::new(&config.network)?;
        let spinner = output::spinner("Checking environment connectivity...");
        let report = checker.run().await;
        spinner.finish_and_clear();

        // Advisory only, init continues regardless of the verdict
        show_connectivity(&report);
    }

    let helm = HelmClient::new(config);
    let outcome = helm
        .initialize()
        .await
        .map_err(|e| anyhow::anyhow!("Helm configuration error: {}", e))?;

    match outcome {
        InitOutcome::AlreadyInstalled => {
            output::info("Netsocs is already installed");
        }
        InitOutcome::Installed => {
            output::success("Netsocs installed successfully!");
        }
    }

    Ok(())
}
