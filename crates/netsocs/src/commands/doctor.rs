//! Doctor command - check connectivity and required tools

use anyhow::{bail, Result};
use netsocs_core::RuntimeConfig;
use netsocs_doctor::{
    required_tools, ConnectivityChecker, ConnectivityReport, ConnectivityVerdict, ToolChecker,
    ToolStatus,
};
use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::cli::DoctorArgs;
use crate::output;

#[derive(Tabled)]
struct EndpointRow {
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Response Time")]
    latency: String,
}

#[derive(Serialize)]
struct DoctorReport<'a> {
    connectivity: &'a ConnectivityReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolStatus]>,
}

pub async fn run(args: DoctorArgs, config: RuntimeConfig) -> Result<()> {
    let checker = ConnectivityChecker::new(&config.network)?;

    let spinner = (!args.json).then(|| output::spinner("Checking environment connectivity..."));
    let report = checker.run().await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let tools = if args.network_only {
        None
    } else {
        Some(ToolChecker::new().check_all(&required_tools(&config)).await)
    };

    if args.json {
        let doc = DoctorReport {
            connectivity: &report,
            tools: tools.as_deref(),
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        show_connectivity(&report);
        if let Some(statuses) = &tools {
            show_tools(statuses);
        }
    }

    let missing = tools
        .as_deref()
        .map(|t| t.iter().filter(|s| !s.is_available()).count())
        .unwrap_or(0);

    if !report.verdict.is_ok() || missing > 0 {
        bail!("Environment check failed");
    }
    Ok(())
}

/// Print the per-endpoint table and the verdict
pub(crate) fn show_connectivity(report: &ConnectivityReport) {
    output::header("Verification Results");

    let total = report.checks.len();
    let failed = report.failed();
    output::info(&format!(
        "Connected: {} | Failed: {} | Total: {}",
        total - failed,
        failed,
        total
    ));

    let rows: Vec<EndpointRow> = report
        .checks
        .iter()
        .map(|check| EndpointRow {
            url: check.url.clone(),
            status: check.status_text(),
            latency: format!("{:.2}s", check.duration.as_secs_f64()),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);

    match report.verdict {
        ConnectivityVerdict::AllReachable => output::success("All URLs are accessible."),
        ConnectivityVerdict::Degraded => output::warning(
            "Some URLs are not accessible. Check the environment network connection.",
        ),
        ConnectivityVerdict::Blocked => {
            output::error("Many URLs are not accessible. Possible network blocking detected.")
        }
    }
}

fn show_tools(statuses: &[ToolStatus]) {
    println!("\n{}", "Required Tools".bold());
    println!("{}", "─".repeat(40));

    for status in statuses {
        let icon = if status.is_available() {
            "✓".green().to_string()
        } else {
            "✗".red().to_string()
        };
        let version = status
            .version
            .as_ref()
            .map(|v| format!(" ({})", v))
            .unwrap_or_default();

        println!(
            "  {} {} [{}]{}",
            icon,
            status.tool.name,
            status.tool.command.dimmed(),
            version.dimmed()
        );
    }
}
