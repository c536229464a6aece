//! Timing sections from TOML (`[timeouts]` and `[poller]`)

use mad_application::DEFAULT_POLL_INTERVAL;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw per-operation timeouts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTimeoutsConfig {
    /// How long to wait for a provider's input to appear
    pub input_ready_ms: u64,
    /// How long one provider may take to answer
    pub response_ms: u64,
}

impl Default for FileTimeoutsConfig {
    fn default() -> Self {
        Self {
            input_ready_ms: 10_000,
            response_ms: 120_000,
        }
    }
}

impl FileTimeoutsConfig {
    pub fn input_ready(&self) -> Duration {
        Duration::from_millis(self.input_ready_ms)
    }

    pub fn response(&self) -> Duration {
        Duration::from_millis(self.response_ms)
    }
}

/// Raw status poller settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePollerConfig {
    pub enabled: bool,
    pub interval_secs: u64,
}

impl Default for FilePollerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: DEFAULT_POLL_INTERVAL.as_secs(),
        }
    }
}

impl FilePollerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}
