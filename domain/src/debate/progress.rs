//! Records reported while a debate runs

use super::entities::DebateElement;
use super::value_objects::{ElementId, SessionId};
use crate::core::provider::Provider;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Step of a participant turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressPhase {
    Input,
    Waiting,
    Extracting,
    Scoring,
    CycleCheck,
}

impl ProgressPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressPhase::Input => "input",
            ProgressPhase::Waiting => "waiting",
            ProgressPhase::Extracting => "extracting",
            ProgressPhase::Scoring => "scoring",
            ProgressPhase::CycleCheck => "cycle_check",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProgressPhase::Input => "Entering prompt",
            ProgressPhase::Waiting => "Waiting for response",
            ProgressPhase::Extracting => "Extracting response",
            ProgressPhase::Scoring => "Scoring elements",
            ProgressPhase::CycleCheck => "Checking for cycles",
        }
    }
}

impl std::fmt::Display for ProgressPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateProgress {
    pub session_id: SessionId,
    pub iteration: u32,
    #[serde(rename = "currentProvider")]
    pub provider: Provider,
    pub phase: ProgressPhase,
}

/// A score a participant gave one element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementScoreUpdate {
    pub element_id: ElementId,
    pub element_name: String,
    pub score: u8,
    pub critique: String,
    pub iteration: u32,
}

/// Final snapshot of a completed debate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateResult {
    pub session_id: SessionId,
    pub final_elements: Vec<DebateElement>,
    pub total_iterations: u32,
    pub completed_at: DateTime<Utc>,
}

impl DebateResult {
    pub fn new(session_id: SessionId, final_elements: Vec<DebateElement>, total_iterations: u32) -> Self {
        Self {
            session_id,
            final_elements,
            total_iterations,
            completed_at: Utc::now(),
        }
    }

    pub fn average_score(&self) -> Option<f64> {
        if self.final_elements.is_empty() {
            return None;
        }
        let total: u32 = self
            .final_elements
            .iter()
            .map(|e| e.current_score as u32)
            .sum();
        Some(total as f64 / self.final_elements.len() as f64)
    }
}
