//! Debate domain entities

use super::config::DebateConfig;
use super::value_objects::{CompletionReason, ElementId, ElementStatus, SessionId, SessionStatus};
use crate::core::error::DomainError;
use crate::core::provider::Provider;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scored revision of an element (append-only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementVersion {
    pub iteration: u32,
    pub content: String,
    pub score: u8,
    pub timestamp: DateTime<Utc>,
    pub provider: Provider,
}

impl ElementVersion {
    pub fn new(iteration: u32, content: impl Into<String>, score: u8, provider: Provider) -> Self {
        Self {
            iteration,
            content: content.into(),
            score,
            timestamp: Utc::now(),
            provider,
        }
    }
}

/// An aspect of the topic that is scored and refined until done (Entity)
///
/// A terminal status always comes with a completion reason, and the
/// iterations in `version_history` are strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateElement {
    pub id: ElementId,
    pub name: String,
    pub status: ElementStatus,
    pub current_score: u8,
    pub score_history: Vec<u8>,
    pub version_history: Vec<ElementVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_reason: Option<CompletionReason>,
}

impl DebateElement {
    /// A fresh element that is already taking part in iterations
    pub fn new(session: &SessionId, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: ElementId::for_element(session, &name),
            name,
            status: ElementStatus::InProgress,
            current_score: 0,
            score_history: Vec::new(),
            version_history: Vec::new(),
            completed_at: None,
            completion_reason: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Append a version and make its score current
    pub fn record_version(&mut self, version: ElementVersion) -> Result<(), DomainError> {
        if !self.is_open() {
            return Err(DomainError::ElementClosed(self.name.clone()));
        }
        if let Some(last) = self.version_history.last()
            && version.iteration <= last.iteration
        {
            return Err(DomainError::NonIncreasingIteration {
                element: self.name.clone(),
                last: last.iteration,
                got: version.iteration,
            });
        }
        self.current_score = version.score;
        self.score_history.push(version.score);
        self.version_history.push(version);
        Ok(())
    }

    /// Close the element. Completing an already closed element is a no-op.
    pub fn complete(&mut self, reason: CompletionReason) {
        if !self.is_open() {
            return;
        }
        self.status = reason.terminal_status();
        self.completion_reason = Some(reason);
        self.completed_at = Some(Utc::now());
    }

    /// Up to `n` most recent versions, oldest first
    pub fn last_versions(&self, n: usize) -> &[ElementVersion] {
        let start = self.version_history.len().saturating_sub(n);
        &self.version_history[start..]
    }
}

/// One run of the debate process (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateSession {
    pub id: SessionId,
    pub config: DebateConfig,
    pub status: SessionStatus,
    pub current_iteration: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl DebateSession {
    pub fn new(config: DebateConfig) -> Self {
        Self::with_id(SessionId::generate(), config)
    }

    pub fn with_id(id: SessionId, config: DebateConfig) -> Self {
        Self {
            id,
            config,
            status: SessionStatus::Pending,
            current_iteration: 0,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn transition(&mut self, next: SessionStatus) -> Result<(), DomainError> {
        if self.status == next {
            return Ok(());
        }
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        if next.is_terminal() {
            self.completed_at = Some(Utc::now());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element() -> DebateElement {
        DebateElement::new(&SessionId::new("debate-1"), "Security")
    }

    #[test]
    fn test_new_element_is_in_progress() {
        let e = element();
        assert_eq!(e.status, ElementStatus::InProgress);
        assert_eq!(e.current_score, 0);
        assert!(e.completion_reason.is_none());
    }

    #[test]
    fn test_record_version_updates_score() {
        let mut e = element();
        e.record_version(ElementVersion::new(1, "v1", 70, Provider::ChatGpt))
            .unwrap();
        e.record_version(ElementVersion::new(2, "v2", 85, Provider::Claude))
            .unwrap();
        assert_eq!(e.current_score, 85);
        assert_eq!(e.score_history, vec![70, 85]);
    }

    #[test]
    fn test_record_version_rejects_non_increasing_iteration() {
        let mut e = element();
        e.record_version(ElementVersion::new(2, "v", 70, Provider::ChatGpt))
            .unwrap();
        let err = e
            .record_version(ElementVersion::new(2, "v", 71, Provider::ChatGpt))
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::NonIncreasingIteration { last: 2, got: 2, .. }
        ));
        assert_eq!(e.version_history.len(), 1);
    }

    #[test]
    fn test_complete_sets_reason_and_timestamp() {
        let mut e = element();
        e.complete(CompletionReason::Cycle);
        assert_eq!(e.status, ElementStatus::CycleDetected);
        assert_eq!(e.completion_reason, Some(CompletionReason::Cycle));
        assert!(e.completed_at.is_some());

        // closed elements keep their first reason
        e.complete(CompletionReason::Threshold);
        assert_eq!(e.status, ElementStatus::CycleDetected);
        assert!(
            e.record_version(ElementVersion::new(9, "late", 99, Provider::Gemini))
                .is_err()
        );
    }

    #[test]
    fn test_last_versions() {
        let mut e = element();
        for i in 1..=5 {
            e.record_version(ElementVersion::new(i, format!("v{i}"), 50, Provider::ChatGpt))
                .unwrap();
        }
        let last: Vec<u32> = e.last_versions(3).iter().map(|v| v.iteration).collect();
        assert_eq!(last, vec![3, 4, 5]);
        assert_eq!(e.last_versions(10).len(), 5);
    }

    #[test]
    fn test_session_transitions() {
        let config = DebateConfig::new("t", vec![Provider::ChatGpt], Provider::Claude);
        let mut s = DebateSession::new(config);
        assert_eq!(s.status, SessionStatus::Pending);
        s.transition(SessionStatus::Running).unwrap();
        s.transition(SessionStatus::Completed).unwrap();
        assert!(s.completed_at.is_some());
        assert!(s.transition(SessionStatus::Running).is_err());
    }
}
