//! Netsocs Doctor - environment diagnostics
//!
//! # Features
//!
//! - **Connectivity**: sequential GETs against the endpoints an installation
//!   pulls from, with latency and an aggregate verdict
//! - **Tools**: presence and version of `helm`, `kubectl` and `bash`
//!
//! Both checks are advisory; callers decide whether to continue.

mod connectivity;
mod tools;

pub use connectivity::{
    ConnectivityChecker, ConnectivityReport, ConnectivityVerdict, EndpointCheck, EndpointOutcome,
};
pub use tools::{extract_version, required_tools, RequiredTool, ToolChecker, ToolState, ToolStatus};
