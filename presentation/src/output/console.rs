//! Console output formatter for debate results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use mad_domain::{
    CompletionReason, DebateConfig, DebateElement, DebateResult, Preset, Provider, preview,
};
use serde::Serialize;

/// Formats debate results for console display
pub struct ResultFormatter;

/// JSON document printed with `--output json`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    topic: &'a str,
    preset: Preset,
    participants: &'a [Provider],
    judge: Provider,
    completion_threshold: u8,
    average_score: Option<f64>,
    #[serde(flatten)]
    result: &'a DebateResult,
}

impl ResultFormatter {
    /// Format the complete debate result
    pub fn format_full(config: &DebateConfig, result: &DebateResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Debate Results"));
        output.push('\n');
        output.push_str(&Self::overview(config, result));

        for element in &result.final_elements {
            output.push_str(&Self::section_header(&format!(
                "{} ({})",
                element.name,
                Self::reason_label(element.completion_reason)
            )));

            let history = element
                .score_history
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(" → ");
            output.push_str(&format!(
                "{} {}\n",
                "Scores:".cyan().bold(),
                if history.is_empty() { "-".to_string() } else { history }
            ));

            if let Some(version) = element.version_history.last() {
                output.push_str(&format!(
                    "{}\n{}\n",
                    format!(
                        "── final version (#{}, {}) ──",
                        version.iteration,
                        version.provider.as_str()
                    )
                    .yellow()
                    .bold(),
                    Self::indent(&version.content, "  ")
                ));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(config: &DebateConfig, result: &DebateResult) -> String {
        let report = JsonReport {
            topic: &config.topic,
            preset: config.preset,
            participants: &config.participants,
            judge: config.judge,
            completion_threshold: config.completion_threshold,
            average_score: result.average_score(),
            result,
        };
        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format one line per element (concise output)
    pub fn format_summary(config: &DebateConfig, result: &DebateResult) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", "=== Debate Summary ===".cyan().bold()));
        output.push_str(&Self::overview(config, result));

        let width = result
            .final_elements
            .iter()
            .map(|e| e.name.chars().count())
            .max()
            .unwrap_or(0);
        for element in &result.final_elements {
            output.push_str(&Self::summary_line(element, width));
            output.push('\n');
        }

        output
    }

    fn overview(config: &DebateConfig, result: &DebateResult) -> String {
        let participants = config
            .participants
            .iter()
            .map(Provider::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let average = result
            .average_score()
            .map(|avg| format!("{:.1}", avg))
            .unwrap_or_else(|| "-".to_string());

        format!(
            "{} {}\n{} {} (judge: {})\n{} {}  {} {}\n\n",
            "Topic:".cyan().bold(),
            preview(&config.topic, 200),
            "Participants:".cyan().bold(),
            participants,
            config.judge.as_str(),
            "Iterations:".cyan().bold(),
            result.total_iterations,
            "Average score:".cyan().bold(),
            average
        )
    }

    fn summary_line(element: &DebateElement, width: usize) -> String {
        let mark = match element.completion_reason {
            Some(CompletionReason::Threshold) => "✓".green(),
            Some(CompletionReason::Cycle) => "↻".yellow(),
            None => "·".dimmed(),
        };
        format!(
            "  {} {:<width$}  {:>3}  {}",
            mark,
            element.name,
            element.current_score,
            Self::reason_label(element.completion_reason).dimmed(),
            width = width
        )
    }

    fn reason_label(reason: Option<CompletionReason>) -> &'static str {
        match reason {
            Some(CompletionReason::Threshold) => "threshold reached",
            Some(CompletionReason::Cycle) => "cycle detected",
            None => "open",
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ResultFormatter {
    fn format_full(&self, config: &DebateConfig, result: &DebateResult) -> String {
        Self::format_full(config, result)
    }

    fn format_summary(&self, config: &DebateConfig, result: &DebateResult) -> String {
        Self::format_summary(config, result)
    }

    fn format_json(&self, config: &DebateConfig, result: &DebateResult) -> String {
        Self::format_json(config, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mad_domain::{ElementVersion, OutputFormat, SessionId};

    fn fixture() -> (DebateConfig, DebateResult) {
        colored::control::set_override(false);
        let session = SessionId::new("debate-1");
        let config = DebateConfig::new(
            "Review the rate limiter",
            vec![Provider::ChatGpt, Provider::Claude],
            Provider::Gemini,
        );

        let mut security = DebateElement::new(&session, "Security");
        security.current_score = 92;
        security.score_history = vec![70, 92];
        security.version_history = vec![
            ElementVersion::new(1, "v1", 70, Provider::ChatGpt),
            ElementVersion::new(2, "Use constant-time compare\nfor tokens", 92, Provider::Claude),
        ];
        security.completion_reason = Some(CompletionReason::Threshold);

        let mut perf = DebateElement::new(&session, "Performance");
        perf.current_score = 80;
        perf.score_history = vec![80, 80, 80];
        perf.completion_reason = Some(CompletionReason::Cycle);

        let result = DebateResult::new(session, vec![security, perf], 3);
        (config, result)
    }

    #[test]
    fn test_summary_lists_each_element() {
        let (config, result) = fixture();
        let out = ResultFormatter::format_summary(&config, &result);
        assert!(out.contains("Topic: Review the rate limiter"));
        assert!(out.contains("Participants: chatgpt, claude (judge: gemini)"));
        assert!(out.contains("Average score: 86.0"));
        assert!(out.contains("  ✓ Security      92  threshold reached"));
        assert!(out.contains("  ↻ Performance   80  cycle detected"));
    }

    #[test]
    fn test_full_shows_history_and_final_version() {
        let (config, result) = fixture();
        let out = ResultFormatter.format(OutputFormat::Full, &config, &result);
        assert!(out.contains("Scores: 70 → 92"));
        assert!(out.contains("── final version (#2, claude) ──"));
        assert!(out.contains("  Use constant-time compare\n  for tokens"));
    }

    #[test]
    fn test_json_report() {
        let (config, result) = fixture();
        let out = ResultFormatter.format(OutputFormat::Json, &config, &result);
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["topic"], "Review the rate limiter");
        assert_eq!(json["judge"], "gemini");
        assert_eq!(json["sessionId"], "debate-1");
        assert_eq!(json["totalIterations"], 3);
        assert_eq!(json["finalElements"].as_array().unwrap().len(), 2);
        assert_eq!(json["averageScore"], 86.0);
    }
}
