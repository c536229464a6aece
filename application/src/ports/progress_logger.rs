//! Progress logging port
//!
//! Human-facing progress lines: provider activity sampled by the status
//! poller, and element scores, cycles and iterations reported by the
//! controller. Implementations live in the presentation layer.

use mad_domain::{LlmStatus, Provider};

pub trait ProgressLogger: Send + Sync {
    /// A provider's generation activity
    fn log_status(&self, status: &LlmStatus);

    fn log_element_score(&self, name: &str, score: u8, completed: bool);

    fn log_cycle_detected(&self, name: &str);

    fn log_iteration(&self, iteration: u32, provider: Provider);
}

/// No-op progress logger for when progress reporting is not needed
pub struct NoProgressLogger;

impl ProgressLogger for NoProgressLogger {
    fn log_status(&self, _status: &LlmStatus) {}
    fn log_element_score(&self, _name: &str, _score: u8, _completed: bool) {}
    fn log_cycle_detected(&self, _name: &str) {}
    fn log_iteration(&self, _iteration: u32, _provider: Provider) {}
}
