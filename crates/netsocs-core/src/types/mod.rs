//! Shared type definitions

pub mod runtime_config;

pub use runtime_config::{
    AppConfig, HelmConfig, KubeConfig, NetworkConfig, PathsConfig, RuntimeConfig, UpdateConfig,
};
