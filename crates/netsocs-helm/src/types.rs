//! Release and chart types parsed from helm JSON output

use std::fmt;

use netsocs_core::utils::{chart_version, version_suffix};
use serde::Deserialize;

/// One entry of `helm list --output json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HelmRelease {
    /// Release name
    pub name: String,

    /// Chart reference including version (`netsocs-helm-chart-1.2.3`)
    pub chart: String,

    #[serde(default)]
    pub namespace: String,

    #[serde(default)]
    pub revision: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub app_version: String,
}

impl HelmRelease {
    /// Chart version: the suffix after the last hyphen
    pub fn chart_version(&self) -> &str {
        version_suffix(&self.chart)
    }
}

/// One entry of `helm search repo --versions --output json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChartVersion {
    /// Chart reference (`netsocs/netsocs-helm-chart`)
    pub name: String,

    /// Chart version
    pub version: String,

    #[serde(default)]
    pub app_version: String,

    #[serde(default)]
    pub description: String,
}

/// Deployed chart as reported by helm
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseVersion {
    /// The release exists; holds the chart string
    Installed(String),
    /// helm answered and no release carries the app name
    NotInstalled,
    /// helm could not be queried or its output was unreadable
    Unknown,
}

impl ReleaseVersion {
    /// Whether the release is known to be installed
    pub fn is_installed(&self) -> bool {
        matches!(self, Self::Installed(_))
    }

    /// Whether helm positively reported no release
    pub fn is_not_installed(&self) -> bool {
        matches!(self, Self::NotInstalled)
    }

    /// Full chart string, if installed
    pub fn chart(&self) -> Option<&str> {
        match self {
            Self::Installed(chart) => Some(chart),
            _ => None,
        }
    }

    /// Chart version suffix, if installed
    pub fn version(&self) -> Option<&str> {
        self.chart().map(version_suffix)
    }

    /// Installed chart version, stripping the basename of `chart_ref`
    pub fn version_for(&self, chart_ref: &str) -> Option<&str> {
        self.chart().map(|chart| chart_version(chart, chart_ref))
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Installed(chart) => write!(f, "{}", chart),
            Self::NotInstalled => write!(f, "not installed"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Result of [`crate::HelmClient::initialize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// A release with the app name already existed; nothing was installed
    AlreadyInstalled,
    /// The chart was installed with the values file
    Installed,
}
