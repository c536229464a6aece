//! Debate transcript port.
//!
//! Every prompt a provider receives, every extracted response, the element
//! breakdown, each cycle verdict and every completion is recorded as a
//! [`ConversationEvent`]. Adapters write them somewhere durable (JSONL);
//! `tracing` stays the place for diagnostics.

use serde_json::Value;
use std::fmt;

/// What a transcript record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversationEventKind {
    DebateStarted,
    ElementBreakdown,
    PromptSent,
    ResponseReceived,
    CycleVerdict,
    ElementCompleted,
    DebateCompleted,
}

impl ConversationEventKind {
    /// Value written to the record's `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationEventKind::DebateStarted => "debate_started",
            ConversationEventKind::ElementBreakdown => "element_breakdown",
            ConversationEventKind::PromptSent => "prompt_sent",
            ConversationEventKind::ResponseReceived => "response_received",
            ConversationEventKind::CycleVerdict => "cycle_verdict",
            ConversationEventKind::ElementCompleted => "element_completed",
            ConversationEventKind::DebateCompleted => "debate_completed",
        }
    }
}

impl fmt::Display for ConversationEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transcript record
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    pub kind: ConversationEventKind,
    /// Kind-specific fields, flattened into the record when it is an object
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(kind: ConversationEventKind, payload: Value) -> Self {
        Self { kind, payload }
    }
}

/// Sink for the debate transcript.
///
/// `log` is synchronous and infallible; write failures are dropped so the
/// debate never stops because of its transcript.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Discards every record (transcript disabled)
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
