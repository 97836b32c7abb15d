//! Shared utility functions for netsocs crates

use anyhow::anyhow;
use std::path::PathBuf;

/// Get the user's home directory
///
/// `$HOME` wins over `dirs::home_dir()` so that `sudo -E` and container
/// overrides resolve the same values file as the operator's shell.
pub fn get_home_dir() -> anyhow::Result<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }

    dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))
}

/// Version suffix of a chart string: everything after the last hyphen
///
/// `netsocs-helm-chart-1.2.3` yields `1.2.3`; a string without hyphens is
/// returned unchanged.
pub fn version_suffix(chart: &str) -> &str {
    chart.rsplit('-').next().unwrap_or(chart)
}

/// Chart version of a `helm list` chart string for a known chart reference
///
/// Strips `<chart basename>-` so prerelease versions survive intact:
/// `netsocs-helm-chart-2.0.0-rc.1` with `netsocs/netsocs-helm-chart` yields
/// `2.0.0-rc.1`. Falls back to [`version_suffix`] when the name differs.
pub fn chart_version<'a>(chart: &'a str, chart_ref: &str) -> &'a str {
    let basename = chart_ref.rsplit('/').next().unwrap_or(chart_ref);
    chart
        .strip_prefix(basename)
        .and_then(|rest| rest.strip_prefix('-'))
        .filter(|version| !version.is_empty())
        .unwrap_or_else(|| version_suffix(chart))
}
