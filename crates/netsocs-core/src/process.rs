//! External process execution
//!
//! Every call to `helm` and `kubectl` goes through [`ToolRunner`]. The
//! production implementation is [`SystemRunner`]; tests substitute a runner
//! that replays canned output.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// How the child's stdout/stderr are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Collect stdout and stderr for parsing
    Capture,
    /// Stream directly to the operator's terminal
    Inherit,
}

/// Result of running an external tool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Whether the process exited with status 0
    pub success: bool,

    /// Exit code, if the process was not killed by a signal
    pub code: Option<i32>,

    /// Captured stdout (empty in inherit mode)
    pub stdout: String,

    /// Captured stderr (empty in inherit mode)
    pub stderr: String,
}

impl ToolOutput {
    /// Successful run with the given stdout
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed run with the given exit code and stderr
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Turn a non-zero exit into an [`Error::ExternalTool`]
    pub fn into_success(self, program: &str, args: &[String]) -> Result<Self> {
        if self.success {
            return Ok(self);
        }

        let detail = match (self.stderr.trim(), self.code) {
            ("", Some(code)) => format!("exit status {}", code),
            ("", None) => "terminated by signal".to_string(),
            (stderr, _) => stderr.to_string(),
        };

        Err(Error::external_tool(
            program,
            format!("`{}`: {}", command_line(program, args), detail),
        ))
    }
}

/// Runs external binaries
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run `program` with `args` and wait for it to exit
    ///
    /// A non-zero exit is reported through [`ToolOutput::success`], not as an
    /// error. Errors are reserved for failures to start the process.
    async fn run(&self, program: &str, args: &[String], mode: OutputMode) -> Result<ToolOutput>;
}

/// Runs tools as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ToolRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String], mode: OutputMode) -> Result<ToolOutput> {
        debug!("Running: {}", command_line(program, args));

        let mut cmd = Command::new(program);
        cmd.args(args).stdin(Stdio::null());

        let spawn_error = |e: std::io::Error| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::external_tool(program, "not installed or not found in PATH")
            } else {
                Error::external_tool(program, format!("could not be started: {}", e))
            }
        };

        let output = match mode {
            OutputMode::Capture => {
                let out = cmd.output().await.map_err(spawn_error)?;
                ToolOutput {
                    success: out.status.success(),
                    code: out.status.code(),
                    stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
                }
            }
            OutputMode::Inherit => {
                let status = cmd
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .await
                    .map_err(spawn_error)?;
                ToolOutput {
                    success: status.success(),
                    code: status.code(),
                    ..ToolOutput::default()
                }
            }
        };

        if !output.success {
            warn!(
                "Command failed: {} (code {:?})",
                command_line(program, args),
                output.code
            );
        }

        Ok(output)
    }
}

/// Render a command line for logs and error messages
pub fn command_line(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Convert a slice of string literals into owned arguments
pub fn args<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}
