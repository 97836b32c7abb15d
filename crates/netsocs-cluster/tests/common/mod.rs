//! Common test helpers for netsocs-cluster integration tests

use std::sync::Mutex;

use async_trait::async_trait;
use netsocs_core::error::Result;
use netsocs_core::process::{OutputMode, ToolOutput, ToolRunner};

/// Returns one canned output and records the invocation
pub struct CannedRunner {
    output: ToolOutput,
    pub calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl CannedRunner {
    pub fn new(output: ToolOutput) -> Self {
        Self {
            output,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ToolRunner for CannedRunner {
    async fn run(&self, program: &str, args: &[String], _mode: OutputMode) -> Result<ToolOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));
        Ok(self.output.clone())
    }
}

pub const PODS_WIDE: &str = "\
NAME                           READY   STATUS             RESTARTS   AGE   IP           NODE     NOMINATED NODE   READINESS GATES
netsocs-api-5c7d8b9f4-x2x9k    2/2     Running            0          4d    10.42.0.15   node-1   <none>           <none>
netsocs-web-6f8b7c5d9-lq8mz    1/1     Running            0          4d    10.42.0.16   node-1   <none>           <none>
netsocs-worker-7b9c-pp4rt      0/1     CrashLoopBackOff   12         4d    10.42.0.17   node-1   <none>           <none>
truncated-row 1/1 Running 0 4d
";
