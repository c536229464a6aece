//! Debate configuration (Value Object)

use super::preset::Preset;
use crate::core::error::DomainError;
use crate::core::provider::{Provider, unique_providers};
use serde::{Deserialize, Serialize};

/// Score at or above which an element is considered done
pub const DEFAULT_COMPLETION_THRESHOLD: u8 = 90;

/// What to debate and who takes part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateConfig {
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default)]
    pub preset: Preset,
    /// Providers taking turns, in order
    pub participants: Vec<Provider>,
    /// Provider breaking the topic down and judging cycles
    #[serde(rename = "judgeProvider")]
    pub judge: Provider,
    #[serde(default = "default_threshold")]
    pub completion_threshold: u8,
}

fn default_threshold() -> u8 {
    DEFAULT_COMPLETION_THRESHOLD
}

impl DebateConfig {
    pub fn new(topic: impl Into<String>, participants: Vec<Provider>, judge: Provider) -> Self {
        Self {
            topic: topic.into(),
            context: None,
            preset: Preset::default(),
            participants,
            judge,
            completion_threshold: DEFAULT_COMPLETION_THRESHOLD,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.completion_threshold = threshold;
        self
    }

    /// Participants followed by the judge, without duplicates
    pub fn all_providers(&self) -> Vec<Provider> {
        unique_providers(self.participants.iter().chain(std::iter::once(&self.judge)))
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.topic.trim().is_empty() {
            return Err(DomainError::EmptyTopic);
        }
        if self.participants.is_empty() {
            return Err(DomainError::NoParticipants);
        }
        for (i, provider) in self.participants.iter().enumerate() {
            if self.participants[..i].contains(provider) {
                return Err(DomainError::DuplicateParticipant(provider.to_string()));
            }
        }
        if self.completion_threshold > 100 {
            return Err(DomainError::InvalidThreshold(
                self.completion_threshold as u32,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DebateConfig {
        DebateConfig::new(
            "Review this login handler",
            vec![Provider::ChatGpt, Provider::Claude],
            Provider::Gemini,
        )
    }

    #[test]
    fn test_defaults() {
        let c = config();
        assert_eq!(c.completion_threshold, 90);
        assert_eq!(c.preset, Preset::General);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_all_providers_dedups_judge() {
        let c = DebateConfig::new("t", vec![Provider::ChatGpt, Provider::Claude], Provider::Claude);
        assert_eq!(c.all_providers(), vec![Provider::ChatGpt, Provider::Claude]);
        assert_eq!(
            config().all_providers(),
            vec![Provider::ChatGpt, Provider::Claude, Provider::Gemini]
        );
    }

    #[test]
    fn test_validation_errors() {
        let mut c = config();
        c.topic = "   ".into();
        assert_eq!(c.validate(), Err(DomainError::EmptyTopic));

        let mut c = config();
        c.participants.clear();
        assert_eq!(c.validate(), Err(DomainError::NoParticipants));

        let mut c = config();
        c.participants.push(Provider::ChatGpt);
        assert_eq!(
            c.validate(),
            Err(DomainError::DuplicateParticipant("chatgpt".into()))
        );

        let c = config().with_threshold(101);
        assert_eq!(c.validate(), Err(DomainError::InvalidThreshold(101)));
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let c: DebateConfig = serde_json::from_str(
            r#"{"topic":"t","preset":"code_review","participants":["chatgpt"],"judgeProvider":"claude"}"#,
        )
        .unwrap();
        assert_eq!(c.preset, Preset::CodeReview);
        assert_eq!(c.judge, Provider::Claude);
        assert_eq!(c.completion_threshold, 90);
    }
}
