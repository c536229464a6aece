//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Provider and preset names stay as strings here and are parsed by
//! [`FileConfig::validate`] and the `parse_*` helpers, so a typo is reported
//! with its field instead of failing the whole file.

mod bridge;
mod debate;
mod logging;
mod output;
mod runtime;

pub use bridge::FileBridgeConfig;
pub use debate::FileDebateConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use runtime::{FilePollerConfig, FileTimeoutsConfig};

use mad_application::DebateParams;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A problem found while validating a loaded configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("{field}: unknown provider '{value}' (expected chatgpt, claude or gemini)")]
    UnknownProvider { field: &'static str, value: String },

    #[error("debate.preset: unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("debate.completion_threshold: {0} is out of range (0-100)")]
    InvalidThreshold(u8),

    #[error("debate.participants: '{0}' is listed more than once")]
    DuplicateParticipant(String),

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),

    #[error("bridge.command must not be empty")]
    EmptyBridgeCommand,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Debate defaults (participants, judge, preset, threshold)
    pub debate: FileDebateConfig,
    /// Per-operation timeouts
    pub timeouts: FileTimeoutsConfig,
    /// Background status polling
    pub poller: FilePollerConfig,
    /// Hosting shell process
    pub bridge: FileBridgeConfig,
    pub logging: FileLoggingConfig,
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = self.debate.validate();

        if self.timeouts.input_ready_ms == 0 {
            issues.push(ConfigValidationError::ZeroValue("timeouts.input_ready_ms"));
        }
        if self.timeouts.response_ms == 0 {
            issues.push(ConfigValidationError::ZeroValue("timeouts.response_ms"));
        }
        if self.poller.enabled && self.poller.interval_secs == 0 {
            issues.push(ConfigValidationError::ZeroValue("poller.interval_secs"));
        }
        if self.bridge.command.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyBridgeCommand);
        }
        if self.bridge.request_timeout_secs == 0 {
            issues.push(ConfigValidationError::ZeroValue(
                "bridge.request_timeout_secs",
            ));
        }

        issues
    }

    /// Loop control handed to the debate controller
    pub fn debate_params(&self) -> DebateParams {
        DebateParams::default()
            .with_input_timeout(self.timeouts.input_ready())
            .with_response_timeout(self.timeouts.response())
            .with_max_iterations(self.debate.max_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mad_domain::{OutputFormat, Provider};
    use std::time::Duration;

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.debate.completion_threshold, 90);
        assert_eq!(config.bridge.command, "mad-shell");
        assert!(config.poller.enabled);
        assert_eq!(config.poller.interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml_str = r#"
[debate]
participants = ["claude", "gemini"]
judge = "chatgpt"

[timeouts]
response_ms = 60000
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let (participants, issues) = config.debate.parse_participants();
        assert!(issues.is_empty());
        assert_eq!(participants, vec![Provider::Claude, Provider::Gemini]);
        assert_eq!(config.debate.parse_judge().unwrap(), Some(Provider::ChatGpt));
        assert_eq!(config.timeouts.input_ready_ms, 10_000);
        assert_eq!(config.timeouts.response(), Duration::from_secs(60));
        assert_eq!(config.output.format, None);
    }

    #[test]
    fn test_full_toml() {
        let toml_str = r#"
[debate]
participants = ["chatgpt", "claude", "gemini"]
judge = "claude"
preset = "decision"
completion_threshold = 85
max_iterations = 20

[timeouts]
input_ready_ms = 5000
response_ms = 90000

[poller]
enabled = false

[bridge]
command = "/opt/mad/shell"
args = ["--headless"]
request_timeout_secs = 45

[logging]
conversation_log = true
dir = "/var/log/mad"

[output]
format = "full"
color = false
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_empty());
        assert_eq!(config.debate.max_iterations, Some(20));
        assert!(!config.poller.enabled);
        assert_eq!(config.bridge.args, vec!["--headless".to_string()]);
        assert_eq!(config.bridge.request_timeout(), Duration::from_secs(45));
        assert!(config.logging.conversation_log);
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);

        let params = config.debate_params();
        assert_eq!(params.input_timeout, Duration::from_secs(5));
        assert_eq!(params.response_timeout, Duration::from_secs(90));
        assert_eq!(params.max_iterations, Some(20));
    }

    #[test]
    fn test_validate_collects_every_issue() {
        let toml_str = r#"
[debate]
participants = ["chatgpt", "bard"]
judge = "bard"

[timeouts]
response_ms = 0

[bridge]
command = "  "
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 4);
        assert!(issues.contains(&ConfigValidationError::UnknownProvider {
            field: "debate.participants",
            value: "bard".into(),
        }));
        assert!(issues.contains(&ConfigValidationError::UnknownProvider {
            field: "debate.judge",
            value: "bard".into(),
        }));
        assert!(issues.contains(&ConfigValidationError::ZeroValue("timeouts.response_ms")));
        assert!(issues.contains(&ConfigValidationError::EmptyBridgeCommand));
    }

    #[test]
    fn test_disabled_poller_skips_interval_check() {
        let mut config = FileConfig::default();
        config.poller.interval_secs = 0;
        assert_eq!(
            config.validate(),
            vec![ConfigValidationError::ZeroValue("poller.interval_secs")]
        );
        config.poller.enabled = false;
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigValidationError::UnknownProvider {
            field: "debate.judge",
            value: "bard".into(),
        };
        assert_eq!(
            err.to_string(),
            "debate.judge: unknown provider 'bard' (expected chatgpt, claude or gemini)"
        );
        assert_eq!(
            ConfigValidationError::ZeroValue("poller.interval_secs").to_string(),
            "poller.interval_secs must be greater than zero"
        );
    }
}
