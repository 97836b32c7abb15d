//! Status command

use anyhow::{bail, Context, Result};
use netsocs_cluster::{HealthReport, KubectlClient, PodRecord};
use netsocs_core::RuntimeConfig;
use netsocs_helm::HelmClient;
use owo_colors::OwoColorize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::StatusArgs;
use crate::commands::NOT_INSTALLED_MESSAGE;
use crate::output;

#[derive(Tabled)]
struct PodRow {
    #[tabled(rename = "Pod")]
    name: String,
    #[tabled(rename = "Ready")]
    ready: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Restarts")]
    restarts: String,
    #[tabled(rename = "Age")]
    age: String,
}

pub async fn run(args: StatusArgs, verbose: bool, config: RuntimeConfig) -> Result<()> {
    let kubectl = KubectlClient::new(&config);
    let deployed = HelmClient::new(config).current_version().await;
    if deployed.is_not_installed() {
        bail!(NOT_INSTALLED_MESSAGE);
    }

    let report = kubectl
        .health_report()
        .await
        .context("Failed to check pods")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    output::header(&format!("NETSOCS Status {}", deployed));

    if report.is_all_clear() {
        output::success("All NETSOCS services are operational");
    } else {
        output::error(&format!(
            "Problems detected in the following pods: {}",
            report.unhealthy.join(", ")
        ));
    }

    if report.show_table(verbose) {
        show_pods(&report);
    }

    Ok(())
}

fn show_pods(report: &HealthReport) {
    let rows: Vec<PodRow> = report.pods.iter().map(pod_row).collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);
}

/// Table row; the health columns of an unhealthy pod are red
fn pod_row(pod: &PodRecord) -> PodRow {
    let cell = |text: &str| {
        if pod.is_healthy() {
            text.green().to_string()
        } else {
            text.red().to_string()
        }
    };

    PodRow {
        name: pod.name.clone(),
        ready: cell(&pod.ready),
        status: cell(&pod.status),
        restarts: cell(&pod.restarts),
        age: pod.age.clone(),
    }
}
