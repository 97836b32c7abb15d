//! Version command

use anyhow::Result;
use netsocs_core::RuntimeConfig;
use netsocs_helm::{HelmClient, ReleaseVersion};
use serde::Serialize;

use crate::cli::VersionArgs;
use crate::output;
use crate::version::VersionInfo;

#[derive(Serialize)]
struct VersionReport {
    cli: VersionInfo,
    /// Deployed chart, absent when not installed or unknown
    chart: Option<String>,
    chart_state: String,
}

pub async fn run(args: VersionArgs, config: RuntimeConfig) -> Result<()> {
    let info = VersionInfo::current();
    let deployed = HelmClient::new(config).current_version().await;

    if args.json {
        let report = VersionReport {
            cli: info,
            chart: deployed.chart().map(String::from),
            chart_state: match &deployed {
                ReleaseVersion::Installed(_) => "installed".to_string(),
                ReleaseVersion::NotInstalled => "not_installed".to_string(),
                ReleaseVersion::Unknown => "unknown".to_string(),
            },
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::kv("CLI", &info.display());
        output::kv("Netsocs", &deployed.to_string());
    }

    Ok(())
}
