//! Configuration loading

mod loader;

pub use loader::{
    HierarchicalConfigLoader, ENV_HELM_BIN, ENV_HTTP_TIMEOUT_SECS, ENV_KUBECTL_BIN,
    ENV_RELEASE_API_URL, ENV_WORK_DIR,
};
