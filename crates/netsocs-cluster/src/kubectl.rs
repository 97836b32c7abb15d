//! kubectl wrapper

use std::sync::Arc;

use netsocs_core::error::Result;
use netsocs_core::process::{args, OutputMode, SystemRunner, ToolRunner};
use netsocs_core::RuntimeConfig;
use tracing::debug;

use crate::pod::{parse_pods, HealthReport, PodRecord};

/// Reads pod status through kubectl
pub struct KubectlClient {
    runner: Arc<dyn ToolRunner>,
    binary: String,
}

impl KubectlClient {
    /// Create a client that runs the configured kubectl binary
    pub fn new(config: &RuntimeConfig) -> Self {
        Self::with_runner(config, Arc::new(SystemRunner::new()))
    }

    /// Create a client with a custom process runner
    pub fn with_runner(config: &RuntimeConfig, runner: Arc<dyn ToolRunner>) -> Self {
        Self {
            runner,
            binary: config.kube.binary.clone(),
        }
    }

    /// Pods in the current namespace
    pub async fn fetch_pods(&self) -> Result<Vec<PodRecord>> {
        let argv = args(["get", "pods", "-o=wide"]);
        let output = self
            .runner
            .run(&self.binary, &argv, OutputMode::Capture)
            .await?
            .into_success(&self.binary, &argv)?;

        let pods = parse_pods(&output.stdout);
        debug!("Parsed {} pod(s)", pods.len());
        Ok(pods)
    }

    /// Fetch pods and classify them
    pub async fn health_report(&self) -> Result<HealthReport> {
        Ok(HealthReport::new(self.fetch_pods().await?))
    }
}
