//! Hierarchical configuration loader with precedence
//!
//! Loads the runtime configuration from multiple sources with the following
//! precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. Runtime config file (`~/.netsocs/runtime.yaml`, or `--config <file>`)
//! 3. Environment variables (`NETSOCS_*` prefix)
//!
//! Layers 1 and 2 are deep-merged as YAML trees before deserializing, so a
//! file that sets a single key leaves every other embedded default intact.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rust_embed::RustEmbed;
use serde_yaml_ng::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::RuntimeConfig;
use crate::utils::get_home_dir;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

const DEFAULTS_FILE: &str = "runtime-defaults.yaml";
const RUNTIME_FILE: &str = "runtime.yaml";

/// Environment variable: work directory override
pub const ENV_WORK_DIR: &str = "NETSOCS_WORK_DIR";
/// Environment variable: helm binary override
pub const ENV_HELM_BIN: &str = "NETSOCS_HELM_BIN";
/// Environment variable: kubectl binary override
pub const ENV_KUBECTL_BIN: &str = "NETSOCS_KUBECTL_BIN";
/// Environment variable: release API base URL override
pub const ENV_RELEASE_API_URL: &str = "NETSOCS_RELEASE_API_URL";
/// Environment variable: HTTP timeout override
pub const ENV_HTTP_TIMEOUT_SECS: &str = "NETSOCS_HTTP_TIMEOUT_SECS";

/// Configuration hierarchy loader
pub struct HierarchicalConfigLoader {
    /// Directory holding `runtime.yaml`
    config_dir: PathBuf,
}

impl HierarchicalConfigLoader {
    /// Create a loader rooted at `~/.netsocs`
    pub fn new() -> Result<Self> {
        let home = get_home_dir().map_err(|e| Error::invalid_config(e.to_string()))?;
        Ok(Self {
            config_dir: home.join(".netsocs"),
        })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    /// Directory searched for `runtime.yaml`
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load runtime configuration with hierarchical precedence
    ///
    /// `explicit` replaces the default `runtime.yaml` lookup and must exist.
    pub fn load_runtime_config(&self, explicit: Option<&Path>) -> Result<RuntimeConfig> {
        self.load_with_env(explicit, |key| env::var(key).ok())
    }

    /// Same as [`Self::load_runtime_config`] with a custom environment lookup
    pub fn load_with_env<F>(&self, explicit: Option<&Path>, lookup: F) -> Result<RuntimeConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut tree = Self::load_embedded_tree(DEFAULTS_FILE)?;

        let file = match explicit {
            Some(path) if !path.exists() => {
                return Err(Error::not_found(path.display().to_string()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = self.config_dir.join(RUNTIME_FILE);
                default_path.exists().then_some(default_path)
            }
        };

        if let Some(path) = file {
            debug!("Loading runtime config from {}", path.display());
            let overlay = Self::load_yaml_tree(&path)?;
            merge_yaml_values(&mut tree, overlay);
        }

        let config: RuntimeConfig = serde_yaml_ng::from_value(tree)
            .map_err(|e| Error::invalid_config(format!("Failed to parse runtime config: {}", e)))?;

        apply_env_overrides(config, lookup)
    }

    /// Load an embedded configuration file as a YAML tree
    fn load_embedded_tree(filename: &str) -> Result<Value> {
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::not_found(format!("embedded config {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })
    }

    /// Load a YAML file as a tree
    fn load_yaml_tree(path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path)?;
        let value: Value = serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path.display(), e)))?;

        match value {
            Value::Null => Ok(Value::Mapping(Default::default())),
            Value::Mapping(_) => Ok(value),
            _ => Err(Error::invalid_config(format!(
                "{} must contain a mapping",
                path.display()
            ))),
        }
    }
}

/// Apply `NETSOCS_*` overrides on top of a loaded config
fn apply_env_overrides<F>(mut config: RuntimeConfig, lookup: F) -> Result<RuntimeConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(dir) = non_empty(ENV_WORK_DIR) {
        config.paths.work_dir = Some(PathBuf::from(dir));
    }

    if let Some(helm) = non_empty(ENV_HELM_BIN) {
        config.helm.binary = helm;
    }

    if let Some(kubectl) = non_empty(ENV_KUBECTL_BIN) {
        config.kube.binary = kubectl;
    }

    if let Some(url) = non_empty(ENV_RELEASE_API_URL) {
        config.update.api_url = url.trim_end_matches('/').to_string();
    }

    if let Some(timeout) = non_empty(ENV_HTTP_TIMEOUT_SECS) {
        config.network.http_timeout_secs = timeout.trim().parse().map_err(|_| {
            Error::invalid_config(format!(
                "{} must be a number of seconds, got '{}'",
                ENV_HTTP_TIMEOUT_SECS, timeout
            ))
        })?;
    }

    Ok(config)
}

/// Deep merge YAML values (source takes precedence)
fn merge_yaml_values(dest: &mut Value, source: Value) {
    match (dest, source) {
        (Value::Mapping(dest_map), Value::Mapping(source_map)) => {
            for (key, value) in source_map {
                match dest_map.get_mut(&key) {
                    Some(dest_value) => merge_yaml_values(dest_value, value),
                    None => {
                        dest_map.insert(key, value);
                    }
                }
            }
        }
        (dest_value, source_value) => {
            *dest_value = source_value;
        }
    }
}
