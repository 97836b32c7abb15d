//! Kubernetes pod status for the Netsocs deployment
//!
//! Runs `kubectl get pods -o=wide`, parses the whitespace-aligned table into
//! [`PodRecord`]s and classifies their health.

pub mod kubectl;
pub mod pod;

pub use kubectl::KubectlClient;
pub use pod::{parse_pods, HealthReport, PodRecord};
