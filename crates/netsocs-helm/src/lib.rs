//! Helm release management for Netsocs
//!
//! Wraps the `helm` binary for everything the manager does with the
//! deployed release:
//!
//! - Chart repository registration
//! - Install, upgrade and rollback (tool output streamed to the terminal)
//! - Installed chart version and available chart versions (JSON output parsed)
//! - Default values file generation from the chart
//!
//! # Example
//!
//! ```ignore
//! use netsocs_core::RuntimeConfig;
//! use netsocs_helm::HelmClient;
//!
//! let helm = HelmClient::new(RuntimeConfig::default());
//! println!("Deployed: {}", helm.current_version().await);
//! ```

pub mod client;
pub mod types;

pub use client::HelmClient;
pub use types::{ChartVersion, HelmRelease, InitOutcome, ReleaseVersion};
