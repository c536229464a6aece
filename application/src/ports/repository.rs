//! Debate repository port
//!
//! Storage for sessions, elements and their version histories. Only the
//! debate controller writes to it.

use mad_domain::{
    CompletionReason, DebateElement, DebateSession, ElementId, ElementVersion, SessionId,
    SessionStatus,
};
use thiserror::Error;

/// Errors that can occur during repository operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Session already exists: {0}")]
    SessionExists(SessionId),

    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    #[error("Element {element} already has iteration {last}, cannot append {got}")]
    NonIncreasingIteration {
        element: ElementId,
        last: u32,
        got: u32,
    },

    #[error("Element already complete: {0}")]
    ElementClosed(ElementId),

    #[error("Invalid status change: {0}")]
    InvalidTransition(String),
}

/// Storage for debate state
///
/// Calls are synchronous and short; implementations must not block on I/O
/// held across an await point.
pub trait DebateRepository: Send + Sync {
    fn create(&self, session: DebateSession) -> Result<(), RepositoryError>;

    fn session(&self, session_id: &SessionId) -> Result<DebateSession, RepositoryError>;

    /// Create one in-progress element per name, in order
    fn create_elements(
        &self,
        session_id: &SessionId,
        names: &[String],
    ) -> Result<Vec<DebateElement>, RepositoryError>;

    /// Append a version and make its score current
    fn update_element_score(
        &self,
        element_id: &ElementId,
        version: ElementVersion,
    ) -> Result<DebateElement, RepositoryError>;

    fn mark_element_complete(
        &self,
        element_id: &ElementId,
        reason: CompletionReason,
    ) -> Result<DebateElement, RepositoryError>;

    /// Up to `n` most recent versions, oldest first
    fn last_versions(
        &self,
        element_id: &ElementId,
        n: usize,
    ) -> Result<Vec<ElementVersion>, RepositoryError>;

    /// Elements still taking part in iterations, in creation order
    fn incomplete_elements(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<DebateElement>, RepositoryError>;

    fn all_elements(&self, session_id: &SessionId) -> Result<Vec<DebateElement>, RepositoryError>;

    fn update_iteration(&self, session_id: &SessionId, iteration: u32)
    -> Result<(), RepositoryError>;

    fn update_status(
        &self,
        session_id: &SessionId,
        status: SessionStatus,
    ) -> Result<(), RepositoryError>;

    /// Drop every session and element
    fn clear(&self);
}
