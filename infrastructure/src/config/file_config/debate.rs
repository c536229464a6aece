//! Debate configuration from TOML (`[debate]` section)

use super::ConfigValidationError;
use mad_domain::{DEFAULT_COMPLETION_THRESHOLD, Preset, Provider};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Raw debate configuration from TOML
///
/// ```toml
/// [debate]
/// participants = ["chatgpt", "claude"]
/// judge = "gemini"
/// preset = "code_review"
/// completion_threshold = 90
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDebateConfig {
    /// Providers taking turns, in order
    pub participants: Vec<String>,
    /// Provider doing element breakdown and cycle checks
    pub judge: Option<String>,
    pub preset: Option<String>,
    /// Score (0-100) at which an element is done
    pub completion_threshold: u8,
    /// Stop after this many participant turns (unbounded when unset)
    pub max_iterations: Option<u32>,
}

impl Default for FileDebateConfig {
    fn default() -> Self {
        Self {
            participants: vec!["chatgpt".to_string(), "claude".to_string()],
            judge: Some("gemini".to_string()),
            preset: None,
            completion_threshold: DEFAULT_COMPLETION_THRESHOLD,
            max_iterations: None,
        }
    }
}

impl FileDebateConfig {
    /// Parse participants; entries that fail to parse are reported, not kept
    pub fn parse_participants(&self) -> (Vec<Provider>, Vec<ConfigValidationError>) {
        let mut providers = Vec::new();
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        for raw in &self.participants {
            match raw.parse::<Provider>() {
                Ok(provider) if !seen.insert(provider) => {
                    issues.push(ConfigValidationError::DuplicateParticipant(raw.clone()));
                }
                Ok(provider) => providers.push(provider),
                Err(_) => issues.push(ConfigValidationError::UnknownProvider {
                    field: "debate.participants",
                    value: raw.clone(),
                }),
            }
        }
        (providers, issues)
    }

    pub fn parse_judge(&self) -> Result<Option<Provider>, ConfigValidationError> {
        self.judge
            .as_deref()
            .map(|raw| {
                raw.parse::<Provider>()
                    .map_err(|_| ConfigValidationError::UnknownProvider {
                        field: "debate.judge",
                        value: raw.to_string(),
                    })
            })
            .transpose()
    }

    pub fn parse_preset(&self) -> Result<Option<Preset>, ConfigValidationError> {
        self.preset
            .as_deref()
            .map(|raw| {
                raw.parse::<Preset>()
                    .map_err(|_| ConfigValidationError::UnknownPreset(raw.to_string()))
            })
            .transpose()
    }

    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let (_, mut issues) = self.parse_participants();
        if let Err(e) = self.parse_judge() {
            issues.push(e);
        }
        if let Err(e) = self.parse_preset() {
            issues.push(e);
        }
        if self.completion_threshold > 100 {
            issues.push(ConfigValidationError::InvalidThreshold(
                self.completion_threshold,
            ));
        }
        if self.max_iterations == Some(0) {
            issues.push(ConfigValidationError::ZeroValue("debate.max_iterations"));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_participants_reports_bad_entries() {
        let config = FileDebateConfig {
            participants: vec!["openai".into(), "bard".into(), "chatgpt".into()],
            ..Default::default()
        };
        let (providers, issues) = config.parse_participants();
        assert_eq!(providers, vec![Provider::ChatGpt]);
        assert_eq!(issues.len(), 2);
        assert!(matches!(
            issues[0],
            ConfigValidationError::UnknownProvider { field: "debate.participants", .. }
        ));
        assert!(matches!(
            issues[1],
            ConfigValidationError::DuplicateParticipant(_)
        ));
    }

    #[test]
    fn test_judge_and_preset() {
        let config = FileDebateConfig {
            judge: Some("anthropic".into()),
            preset: Some("code-review".into()),
            ..Default::default()
        };
        assert_eq!(config.parse_judge().unwrap(), Some(Provider::Claude));
        assert_eq!(config.parse_preset().unwrap(), Some(Preset::CodeReview));

        let config = FileDebateConfig {
            preset: Some("poetry".into()),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            vec![ConfigValidationError::UnknownPreset("poetry".into())]
        );
    }

    #[test]
    fn test_threshold_out_of_range() {
        let config = FileDebateConfig {
            completion_threshold: 150,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            vec![ConfigValidationError::InvalidThreshold(150)]
        );
    }
}
