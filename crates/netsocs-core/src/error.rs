//! Error types for netsocs-core

use thiserror::Error;

/// Result type alias using netsocs-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the manager's facades
#[derive(Error, Debug)]
pub enum Error {
    /// A required file does not exist
    #[error("File not found: {path}")]
    NotFound { path: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Document parsed but does not have the expected shape
    #[error("Invalid document {path}: {message}")]
    InvalidDocument { path: String, message: String },

    /// External binary exited non-zero or could not be started
    #[error("{tool} failed: {message}")]
    ExternalTool { tool: String, message: String },

    /// HTTP request error or non-success status
    #[error("Network error: {message}")]
    Network { message: String },

    /// Release carries no asset the updater can install
    #[error("No suitable binary found in release {tag} (expected '{name}')")]
    AssetNotFound { tag: String, name: String },

    /// Operator input failed validation
    #[error("{message}")]
    Validation { message: String },

    /// Operation requires privileges the process does not have
    #[error("Permission denied: {path}. Run the command again with sudo")]
    Permission { path: String },

    /// Invalid runtime configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a not found error
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create an invalid document error
    pub fn invalid_document(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an external tool failure
    pub fn external_tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExternalTool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a network failure
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a missing release asset error
    pub fn asset_not_found(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self::AssetNotFound {
            tag: tag.into(),
            name: name.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a permission error
    pub fn permission(path: impl Into<String>) -> Self {
        Self::Permission { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// True for YAML/JSON parse failures and shape mismatches
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::YamlParse(_) | Self::JsonParse(_) | Self::InvalidDocument { .. }
        )
    }
}
