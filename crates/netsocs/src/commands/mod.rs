//! CLI command implementations

pub mod cli;
pub mod config;
pub mod doctor;
pub mod init;
pub mod install;
pub mod rollback;
pub mod status;
pub mod upgrade;
pub mod version;
pub mod versions;

use std::path::Path;

use anyhow::{bail, Context, Result};
use netsocs_core::{HierarchicalConfigLoader, RuntimeConfig};
use netsocs_helm::HelmClient;

/// Printed when a command needs a deployed release and helm reports none
pub const NOT_INSTALLED_MESSAGE: &str =
    "Netsocs is not installed. Please run 'netsocs init' to install it.";

/// Load the runtime configuration, honoring `--config`
pub fn load_config(path: Option<&Path>) -> Result<RuntimeConfig> {
    let loader = HierarchicalConfigLoader::new()?;
    loader
        .load_runtime_config(path)
        .context("Failed to load runtime configuration")
}

/// Refuse to continue when helm positively reports no release
///
/// An unknown state (helm unreachable) is let through so the command can
/// surface the underlying error itself.
pub async fn require_installed(helm: &HelmClient) -> Result<()> {
    if helm.current_version().await.is_not_installed() {
        bail!(NOT_INSTALLED_MESSAGE);
    }
    Ok(())
}

/// Render a version list, marking the entry in use
pub fn mark_in_use<F>(versions: &[String], is_current: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    versions
        .iter()
        .map(|v| {
            if is_current(v) {
                format!("* {} (in use)", v)
            } else {
                format!("  {}", v)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_in_use() {
        let versions = vec!["1.3.0".to_string(), "1.2.3".to_string()];
        let lines = mark_in_use(&versions, |v| v == "1.2.3");
        assert_eq!(lines, vec!["  1.3.0", "* 1.2.3 (in use)"]);
    }

    #[test]
    fn test_mark_in_use_none_current() {
        let versions = vec!["1.3.0".to_string()];
        assert_eq!(mark_in_use(&versions, |_| false), vec!["  1.3.0"]);
    }
}
