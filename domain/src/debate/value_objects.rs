//! Debate value objects: identifiers and lifecycle states

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a debate session, `debate-<uuid>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh, globally unique id
    pub fn generate() -> Self {
        Self(format!("debate-{}", Uuid::new_v4()))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an element, derived from its session and name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// `element-<session>-<name>`, stable for a given session and name
    pub fn for_element(session: &SessionId, name: &str) -> Self {
        Self(format!("element-{}-{}", session, name))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle of a debate session
///
/// `Pending → Running → {Completed | Cancelled | Error}`. Terminal states
/// never transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Cancelled,
    Error,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Running => "running",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::Error => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionStatus::Completed | SessionStatus::Cancelled | SessionStatus::Error
        )
    }

    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        match self {
            SessionStatus::Pending => next == SessionStatus::Running || next.is_terminal(),
            SessionStatus::Running => next.is_terminal(),
            _ => false,
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a single element under debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ElementStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    CycleDetected,
}

impl ElementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementStatus::Pending => "pending",
            ElementStatus::InProgress => "in_progress",
            ElementStatus::Completed => "completed",
            ElementStatus::CycleDetected => "cycle_detected",
        }
    }

    /// Still taking part in iterations
    pub fn is_open(&self) -> bool {
        matches!(self, ElementStatus::Pending | ElementStatus::InProgress)
    }
}

impl std::fmt::Display for ElementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an element left the debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    /// Score reached the completion threshold
    Threshold,
    /// Recent versions repeat without progress
    Cycle,
}

impl CompletionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionReason::Threshold => "threshold",
            CompletionReason::Cycle => "cycle",
        }
    }

    /// Terminal element status matching this reason
    pub fn terminal_status(&self) -> ElementStatus {
        match self {
            CompletionReason::Threshold => ElementStatus::Completed,
            CompletionReason::Cycle => ElementStatus::CycleDetected,
        }
    }
}

impl std::fmt::Display for CompletionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
