//! Cycle Detector use case
//!
//! Asks the judge whether an element's recent versions are going in circles.
//! Every failure path answers "no cycle" so a degraded judge never closes an
//! element early.

use crate::config::{CYCLE_WINDOW, DebateParams};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationEventKind, ConversationLogger, NoConversationLogger,
};
use crate::ports::page_adapter::PageAdapterRegistry;
use crate::use_cases::shared::exchange;
use mad_domain::{CycleVerdict, ElementVersion, PromptTemplate, Provider, parse_cycle_verdict};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct CycleDetector {
    registry: Arc<dyn PageAdapterRegistry>,
    judge: Provider,
    params: DebateParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl CycleDetector {
    pub fn new(registry: Arc<dyn PageAdapterRegistry>, judge: Provider, params: DebateParams) -> Self {
        Self {
            registry,
            judge,
            params,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn judge(&self) -> Provider {
        self.judge
    }

    /// Judge the last versions of `element_name`.
    ///
    /// Only the most recent three versions are sent. Fewer than three never
    /// reach the judge.
    pub async fn detect(&self, element_name: &str, versions: &[ElementVersion]) -> CycleVerdict {
        if versions.len() < CYCLE_WINDOW {
            return CycleVerdict::no_cycle(format!(
                "Only {} version(s), need {}",
                versions.len(),
                CYCLE_WINDOW
            ));
        }
        let recent = &versions[versions.len() - CYCLE_WINDOW..];

        let Some(adapter) = self.registry.adapter(self.judge) else {
            warn!("[{}] no judge adapter, assuming no cycle", self.judge);
            return CycleVerdict::no_cycle(format!("Judge {} unavailable", self.judge));
        };

        let prompt = PromptTemplate::cycle_check(element_name, recent);
        let response = match exchange(adapter.as_ref(), &prompt, &self.params, |_| {}).await {
            Ok(response) => response,
            Err(e) => {
                warn!("[{}] cycle check for '{}' failed: {}", self.judge, element_name, e);
                return CycleVerdict::no_cycle(format!("Judge failed: {}", e));
            }
        };

        let verdict = match parse_cycle_verdict(&response) {
            Some(verdict) => verdict,
            None => {
                warn!(
                    "[{}] unreadable cycle verdict for '{}', assuming no cycle",
                    self.judge, element_name
                );
                debug!("Verdict text: {}", response);
                CycleVerdict::no_cycle("Unreadable verdict")
            }
        };

        if verdict.is_cycle {
            info!("Cycle detected for '{}': {}", element_name, verdict.reason);
        }

        self.conversation_logger.log(ConversationEvent::new(
            ConversationEventKind::CycleVerdict,
            serde_json::json!({
                "element": element_name,
                "judge": self.judge.as_str(),
                "iterations": recent.iter().map(|v| v.iteration).collect::<Vec<_>>(),
                "is_cycle": verdict.is_cycle,
                "reason": verdict.reason,
            }),
        ));

        verdict
    }
}
