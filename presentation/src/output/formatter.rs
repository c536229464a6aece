//! Output formatter trait

use mad_domain::{DebateConfig, DebateResult, OutputFormat};

/// Trait for formatting finished debates
pub trait OutputFormatter {
    /// Every element with its score history and final version
    fn format_full(&self, config: &DebateConfig, result: &DebateResult) -> String;

    /// One line per element
    fn format_summary(&self, config: &DebateConfig, result: &DebateResult) -> String;

    /// Format as JSON
    fn format_json(&self, config: &DebateConfig, result: &DebateResult) -> String;

    fn format(&self, format: OutputFormat, config: &DebateConfig, result: &DebateResult) -> String {
        match format {
            OutputFormat::Full => self.format_full(config, result),
            OutputFormat::Summary => self.format_summary(config, result),
            OutputFormat::Json => self.format_json(config, result),
        }
    }
}
