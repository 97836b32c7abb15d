//! # netsocs-core
//!
//! Core library for the Netsocs manager CLI providing:
//! - Runtime configuration (embedded defaults, `runtime.yaml`, `NETSOCS_*` env)
//! - Chart values file editing by dotted path
//! - Server address validation
//! - External tool execution behind the [`ToolRunner`] seam

pub mod address;
pub mod config;
pub mod error;
pub mod process;
pub mod types;
pub mod utils;
pub mod values;

pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use process::{OutputMode, SystemRunner, ToolOutput, ToolRunner};
pub use types::RuntimeConfig;
pub use utils::get_home_dir;
pub use values::ChartValues;
