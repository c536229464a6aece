//! Logging configuration from TOML (`[logging]` section)

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write a JSONL transcript of every debate
    pub conversation_log: bool,
    /// Directory for log files (default: platform data dir)
    pub dir: Option<PathBuf>,
}

impl FileLoggingConfig {
    /// Configured directory, else `<data_local_dir>/mad/logs`
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.dir
            .clone()
            .or_else(|| dirs::data_local_dir().map(|d| d.join("mad").join("logs")))
    }

    /// Transcript file for a debate started at `started`
    pub fn conversation_log_path(&self, started: DateTime<Local>) -> Option<PathBuf> {
        if !self.conversation_log {
            return None;
        }
        self.log_dir().map(|dir| {
            dir.join(format!(
                "debate-{}.conversation.jsonl",
                started.format("%Y%m%d-%H%M%S")
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_conversation_log_path() {
        let started = Local.with_ymd_and_hms(2026, 3, 1, 14, 30, 45).unwrap();

        let disabled = FileLoggingConfig::default();
        assert!(disabled.conversation_log_path(started).is_none());

        let enabled = FileLoggingConfig {
            conversation_log: true,
            dir: Some(PathBuf::from("/tmp/mad-logs")),
        };
        assert_eq!(
            enabled.conversation_log_path(started),
            Some(PathBuf::from(
                "/tmp/mad-logs/debate-20260301-143045.conversation.jsonl"
            ))
        );
    }
}
