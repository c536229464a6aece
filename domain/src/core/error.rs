//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Debate topic cannot be empty")]
    EmptyTopic,

    #[error("At least one participant is required")]
    NoParticipants,

    #[error("Participant listed twice: {0}")]
    DuplicateParticipant(String),

    #[error("Completion threshold must be between 0 and 100, got {0}")]
    InvalidThreshold(u32),

    #[error("Element '{element}' already has iteration {last}, cannot record {got}")]
    NonIncreasingIteration { element: String, last: u32, got: u32 },

    #[error("Element '{0}' is already complete")]
    ElementClosed(String),

    #[error("Session cannot move from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}
