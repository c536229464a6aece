//! Shell bridge configuration from TOML (`[bridge]` section)

use crate::bridge::DEFAULT_REQUEST_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw bridge configuration from TOML
///
/// ```toml
/// [bridge]
/// command = "mad-shell"
/// args = ["--bridge", "--stdio"]
/// request_timeout_secs = 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBridgeConfig {
    /// Executable started as the hosting shell's bridge
    pub command: String,
    pub args: Vec<String>,
    /// Upper bound for a single script execution
    pub request_timeout_secs: u64,
}

impl Default for FileBridgeConfig {
    fn default() -> Self {
        Self {
            command: "mad-shell".to_string(),
            args: vec!["--bridge".to_string(), "--stdio".to_string()],
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
        }
    }
}

impl FileBridgeConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
