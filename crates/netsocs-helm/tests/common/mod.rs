//! Common test helpers for netsocs-helm integration tests
//!
//! Provides a scripted [`ToolRunner`] that replays canned helm output and
//! records every invocation for verification.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use netsocs_core::error::{Error, Result};
use netsocs_core::process::{OutputMode, ToolOutput, ToolRunner};
use netsocs_core::RuntimeConfig;
use tempfile::TempDir;

/// Canned reaction to a command
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Reply {
    Output(ToolOutput),
    SpawnFailure,
}

/// Replays canned output keyed by argument prefix
#[derive(Default)]
pub struct ScriptedRunner {
    rules: Mutex<Vec<(String, Reply)>>,
    #[allow(clippy::type_complexity)]
    calls: Mutex<Vec<(String, Vec<String>, OutputMode)>>,
}

#[allow(dead_code)]
impl ScriptedRunner {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Reply with `stdout` to any command whose joined args start with `prefix`
    pub fn on(&self, prefix: &str, stdout: &str) -> &Self {
        self.reply(prefix, Reply::Output(ToolOutput::ok(stdout)))
    }

    /// Fail with `code` and `stderr` for commands starting with `prefix`
    pub fn fail(&self, prefix: &str, code: i32, stderr: &str) -> &Self {
        self.reply(prefix, Reply::Output(ToolOutput::failed(code, stderr)))
    }

    pub fn reply(&self, prefix: &str, reply: Reply) -> &Self {
        self.rules
            .lock()
            .unwrap()
            .push((prefix.to_string(), reply));
        self
    }

    /// Every invocation as a joined command line
    pub fn command_lines(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(program, args, _)| format!("{} {}", program, args.join(" ")))
            .collect()
    }

    pub fn mode_of(&self, prefix: &str) -> Option<OutputMode> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(_, args, _)| args.join(" ").starts_with(prefix))
            .map(|(_, _, mode)| *mode)
    }

    pub fn was_called(&self, prefix: &str) -> bool {
        self.mode_of(prefix).is_some()
    }
}

#[async_trait]
impl ToolRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[String], mode: OutputMode) -> Result<ToolOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec(), mode));

        let joined = args.join(" ");
        let reply = self
            .rules
            .lock()
            .unwrap()
            .iter()
            .find(|(prefix, _)| joined.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Output(output)) => Ok(output),
            Some(Reply::SpawnFailure) => Err(Error::external_tool(
                program,
                "not installed or not found in PATH",
            )),
            None => Ok(ToolOutput::ok("")),
        }
    }
}

/// Runtime config whose work directory is a fresh temp dir
pub fn test_config() -> (RuntimeConfig, TempDir) {
    let dir = TempDir::new().unwrap();
    let mut config = RuntimeConfig::default();
    config.paths.work_dir = Some(dir.path().join("netsocs"));
    (config, dir)
}

pub const INSTALLED_LIST: &str =
    r#"[{"name":"netsocs","namespace":"default","revision":"3","status":"deployed","chart":"netsocs-helm-chart-1.2.3","app_version":"1.2.3"}]"#;

pub const REPO_LIST: &str = "NAME   \tURL\nnetsocs\thttps://netsocs-team.github.io/netsocs-helm-chart/\n";
