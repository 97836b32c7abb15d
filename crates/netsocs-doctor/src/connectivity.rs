//! Endpoint reachability checks

use std::time::{Duration, Instant};

use netsocs_core::error::{Error, Result};
use netsocs_core::types::NetworkConfig;
use reqwest::redirect::Policy;
use serde::Serialize;
use tracing::{debug, warn};

/// How a single request ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum EndpointOutcome {
    /// 2xx or 3xx status
    Connected(u16),
    /// Any other status
    HttpError(u16),
    /// No response (DNS, TLS, refused, timeout)
    NetworkError(String),
}

/// Result of probing one endpoint
#[derive(Debug, Clone, Serialize)]
pub struct EndpointCheck {
    pub url: String,
    pub outcome: EndpointOutcome,
    #[serde(rename = "duration_ms", serialize_with = "as_millis")]
    pub duration: Duration,
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

impl EndpointCheck {
    pub fn is_connected(&self) -> bool {
        matches!(self.outcome, EndpointOutcome::Connected(_))
    }

    /// Status column text
    pub fn status_text(&self) -> String {
        match &self.outcome {
            EndpointOutcome::Connected(code) => format!("Connected ({})", code),
            EndpointOutcome::HttpError(code) => format!("HTTP error ({})", code),
            EndpointOutcome::NetworkError(message) => format!("Network error: {}", message),
        }
    }
}

/// Aggregate verdict over all endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityVerdict {
    /// Every endpoint answered
    AllReachable,
    /// Fewer than half the endpoints failed
    Degraded,
    /// Half or more failed
    Blocked,
}

impl ConnectivityVerdict {
    /// Classify `failed` failures out of `total` probes
    pub fn from_counts(failed: usize, total: usize) -> Self {
        if failed == 0 {
            Self::AllReachable
        } else if failed * 2 < total {
            Self::Degraded
        } else {
            Self::Blocked
        }
    }

    /// True only when nothing failed
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::AllReachable)
    }
}

/// Every probe plus the verdict
#[derive(Debug, Clone, Serialize)]
pub struct ConnectivityReport {
    pub checks: Vec<EndpointCheck>,
    pub verdict: ConnectivityVerdict,
}

impl ConnectivityReport {
    pub fn failed(&self) -> usize {
        self.checks.iter().filter(|c| !c.is_connected()).count()
    }
}

/// Probes a fixed list of endpoints one after another
pub struct ConnectivityChecker {
    client: reqwest::Client,
    endpoints: Vec<String>,
}

impl ConnectivityChecker {
    /// Create a checker for the configured endpoints
    ///
    /// Redirects are not followed so a 3xx answer is classified as returned.
    pub fn new(network: &NetworkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&network.user_agent)
            .timeout(Duration::from_secs(network.http_timeout_secs))
            .redirect(Policy::none())
            .build()
            .map_err(|e| Error::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoints: network.connectivity_endpoints.clone(),
        })
    }

    /// Replace the endpoint list
    pub fn with_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Probe a single URL
    pub async fn check_endpoint(&self, url: &str) -> EndpointCheck {
        let start = Instant::now();
        let outcome = match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() || status.is_redirection() {
                    EndpointOutcome::Connected(status.as_u16())
                } else {
                    EndpointOutcome::HttpError(status.as_u16())
                }
            }
            Err(e) => EndpointOutcome::NetworkError(describe(&e)),
        };
        let duration = start.elapsed();

        debug!("{} -> {:?} in {:?}", url, outcome, duration);
        EndpointCheck {
            url: url.to_string(),
            outcome,
            duration,
        }
    }

    /// Probe every endpoint in order
    pub async fn run(&self) -> ConnectivityReport {
        let mut checks = Vec::with_capacity(self.endpoints.len());
        for url in &self.endpoints {
            checks.push(self.check_endpoint(url).await);
        }

        let failed = checks.iter().filter(|c| !c.is_connected()).count();
        let verdict = ConnectivityVerdict::from_counts(failed, checks.len());
        if !verdict.is_ok() {
            warn!("{} of {} endpoints unreachable", failed, checks.len());
        }

        ConnectivityReport { checks, verdict }
    }
}

fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "timed out".to_string()
    } else if e.is_connect() {
        "connection failed".to_string()
    } else {
        e.to_string()
    }
}
