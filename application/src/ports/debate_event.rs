//! Debate events emitted by the controller for the hosting layer to render
//!
//! These events form the output port from the application layer to whatever
//! presents the debate (the CLI renderer, or a desktop shell forwarding them
//! over IPC under [`DebateEvent::name`]).

use mad_domain::{
    AdapterErrorCode, CompletionReason, DebateConfig, DebateProgress, DebateResult, ElementId,
    ElementScoreUpdate, SessionId,
};
use serde::Serialize;

/// Events emitted by [`DebateController`](crate::use_cases::run_debate::DebateController)
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DebateEvent {
    /// Session created, login verified
    Started {
        session_id: SessionId,
        config: DebateConfig,
    },
    /// A participant turn moved to a new phase
    Progress(DebateProgress),
    /// A participant scored an element
    ElementScore(ElementScoreUpdate),
    /// An element left the debate
    ElementCompleted {
        element_id: ElementId,
        element_name: String,
        score: u8,
        reason: CompletionReason,
    },
    /// Every element is complete
    Completed(DebateResult),
    Cancelled {
        session_id: SessionId,
        iteration: u32,
    },
    Error {
        session_id: Option<SessionId>,
        code: Option<AdapterErrorCode>,
        message: String,
    },
}

impl DebateEvent {
    /// Channel name used by the hosting shell
    pub fn name(&self) -> &'static str {
        match self {
            DebateEvent::Started { .. } => "debate:start",
            DebateEvent::Progress(_) => "debate:progress",
            DebateEvent::ElementScore(_) => "debate:element-score",
            DebateEvent::ElementCompleted { .. } => "debate:element-complete",
            DebateEvent::Completed(_) => "debate:complete",
            DebateEvent::Cancelled { .. } => "debate:cancelled",
            DebateEvent::Error { .. } => "debate:error",
        }
    }

    /// Whether no further events follow for this session
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DebateEvent::Completed(_) | DebateEvent::Cancelled { .. } | DebateEvent::Error { .. }
        )
    }
}
