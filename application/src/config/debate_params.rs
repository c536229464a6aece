//! Debate parameters for use case loop control.
//!
//! [`DebateParams`] groups the static parameters that control the debate
//! loop in [`DebateController`](crate::use_cases::run_debate::DebateController)
//! and the judge exchanges in
//! [`CycleDetector`](crate::use_cases::cycle_detector::CycleDetector).
//! These are application-layer concerns, not domain policy.

use std::time::Duration;

/// Versions an element needs before it is checked for cycles
pub const CYCLE_WINDOW: usize = 3;

/// Debate loop control parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebateParams {
    /// How long to wait for a provider's input to become usable.
    pub input_timeout: Duration,
    /// How long to wait for a provider to finish answering.
    pub response_timeout: Duration,
    /// Upper bound on participant turns. `None` runs until every element closes.
    pub max_iterations: Option<u32>,
}

impl Default for DebateParams {
    fn default() -> Self {
        Self {
            input_timeout: Duration::from_secs(10),
            response_timeout: Duration::from_secs(120),
            max_iterations: None,
        }
    }
}

impl DebateParams {
    // ==================== Builder Methods ====================

    pub fn with_input_timeout(mut self, timeout: Duration) -> Self {
        self.input_timeout = timeout;
        self
    }

    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    pub fn with_max_iterations(mut self, max: Option<u32>) -> Self {
        self.max_iterations = max;
        self
    }
}
