//! Console implementation of the progress logging port

use chrono::{DateTime, Local};
use colored::Colorize;
use indicatif::ProgressBar;
use mad_application::ProgressLogger;
use mad_domain::{LlmStatus, Provider};

/// Prints provider activity and element progress to stderr.
///
/// Lines are printed through the spinner (if any) so they do not tear its
/// current frame.
pub struct ConsoleProgressLogger {
    spinner: Option<ProgressBar>,
}

impl ConsoleProgressLogger {
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Print above `spinner` instead of writing to stderr directly
    pub fn with_spinner(mut self, spinner: ProgressBar) -> Self {
        self.spinner = Some(spinner);
        self
    }

    fn print(&self, line: String) {
        match &self.spinner {
            Some(spinner) => spinner.suspend(|| eprintln!("{}", line)),
            None => eprintln!("{}", line),
        }
    }

    /// `[14:30:45] chatgpt... writing... 1,234 chars`
    pub fn format_status(status: &LlmStatus, at: DateTime<Local>) -> String {
        let activity = if status.is_writing {
            "writing...".yellow().to_string()
        } else {
            "idle".dimmed().to_string()
        };
        format!(
            "{} {}... {} {} chars",
            format!("[{}]", at.format("%H:%M:%S")).dimmed(),
            status.provider.as_str().bold(),
            activity,
            group_thousands(status.token_count)
        )
    }

    /// `  element[Security] score: 92 ✓ done`
    pub fn format_element_score(name: &str, score: u8, completed: bool) -> String {
        let line = format!("  element[{}] score: {}", name, score);
        if completed {
            format!("{} {}", line, "✓ done".green())
        } else {
            line
        }
    }

    /// `  element[Performance] cycle detected, marked done`
    pub fn format_cycle(name: &str) -> String {
        format!(
            "  element[{}] {}",
            name,
            "cycle detected, marked done".yellow()
        )
    }

    /// `=== Iteration #5 (claude) ===`
    pub fn format_iteration(iteration: u32, provider: Provider) -> String {
        format!("=== Iteration #{} ({}) ===", iteration, provider.as_str())
            .cyan()
            .bold()
            .to_string()
    }
}

impl Default for ConsoleProgressLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressLogger for ConsoleProgressLogger {
    fn log_status(&self, status: &LlmStatus) {
        self.print(Self::format_status(status, Local::now()));
    }

    fn log_element_score(&self, name: &str, score: u8, completed: bool) {
        self.print(Self::format_element_score(name, score, completed));
    }

    fn log_cycle_detected(&self, name: &str) {
        self.print(Self::format_cycle(name));
    }

    fn log_iteration(&self, iteration: u32, provider: Provider) {
        self.print(Self::format_iteration(iteration, provider));
    }
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_234), "1,234");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_status_line() {
        plain();
        let at = Local.with_ymd_and_hms(2026, 3, 1, 14, 30, 45).unwrap();
        let status = LlmStatus::new(Provider::ChatGpt, true, 1234);
        assert_eq!(
            ConsoleProgressLogger::format_status(&status, at),
            "[14:30:45] chatgpt... writing... 1,234 chars"
        );

        let idle = LlmStatus::new(Provider::Gemini, false, 12);
        assert_eq!(
            ConsoleProgressLogger::format_status(&idle, at),
            "[14:30:45] gemini... idle 12 chars"
        );
    }

    #[test]
    fn test_element_lines() {
        plain();
        assert_eq!(
            ConsoleProgressLogger::format_element_score("Security", 92, true),
            "  element[Security] score: 92 ✓ done"
        );
        assert_eq!(
            ConsoleProgressLogger::format_element_score("Security", 40, false),
            "  element[Security] score: 40"
        );
        assert_eq!(
            ConsoleProgressLogger::format_cycle("Performance"),
            "  element[Performance] cycle detected, marked done"
        );
        assert_eq!(
            ConsoleProgressLogger::format_iteration(5, Provider::Claude),
            "=== Iteration #5 (claude) ==="
        );
    }
}
