//! Required tool checks

use std::process::Stdio;
use std::sync::LazyLock;
use std::time::Duration;

use netsocs_core::RuntimeConfig;
use regex::Regex;
use serde::Serialize;
use tokio::process::Command;
use tracing::debug;

/// Pre-compiled regex for extracting version numbers from command output
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v?(\d+\.\d+(?:\.\d+)?)").expect("version regex is valid"));

/// A tool the manager shells out to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredTool {
    /// Display name
    pub name: String,
    /// Binary name or path
    pub command: String,
    /// Arguments that print the version
    pub version_args: Vec<String>,
}

/// Tools used by init, status, upgrade and self-update
pub fn required_tools(config: &RuntimeConfig) -> Vec<RequiredTool> {
    let tool = |name: &str, command: &str, version_args: &[&str]| RequiredTool {
        name: name.to_string(),
        command: command.to_string(),
        version_args: version_args.iter().map(|a| a.to_string()).collect(),
    };

    vec![
        tool("helm", &config.helm.binary, &["version", "--short"]),
        tool("kubectl", &config.kube.binary, &["version", "--client"]),
        tool("bash", "bash", &["--version"]),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolState {
    Available,
    Missing,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolStatus {
    pub tool: RequiredTool,
    pub state: ToolState,
    pub version: Option<String>,
}

impl ToolStatus {
    pub fn is_available(&self) -> bool {
        self.state == ToolState::Available
    }
}

/// Checks tool presence in PATH and reads versions
pub struct ToolChecker {
    timeout: Duration,
}

impl ToolChecker {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Check each tool in order
    pub async fn check_all(&self, tools: &[RequiredTool]) -> Vec<ToolStatus> {
        let mut statuses = Vec::with_capacity(tools.len());
        for tool in tools {
            statuses.push(self.check_tool(tool).await);
        }
        statuses
    }

    async fn check_tool(&self, tool: &RequiredTool) -> ToolStatus {
        if which::which(&tool.command).is_err() {
            debug!("{} not found in PATH", tool.command);
            return ToolStatus {
                tool: tool.clone(),
                state: ToolState::Missing,
                version: None,
            };
        }

        ToolStatus {
            tool: tool.clone(),
            state: ToolState::Available,
            version: self.get_version(tool).await,
        }
    }

    async fn get_version(&self, tool: &RequiredTool) -> Option<String> {
        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&tool.command)
                .args(&tool.version_args)
                .stdin(Stdio::null())
                .output(),
        )
        .await
        .ok()?
        .ok()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        extract_version(&stdout).or_else(|| extract_version(&stderr))
    }
}

impl Default for ToolChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// First version-looking token in `text`
pub fn extract_version(text: &str) -> Option<String> {
    VERSION_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
