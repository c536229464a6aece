//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for debate results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every element with its score history and final version
    Full,
    /// One line per element with its final score
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for mad_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => mad_domain::OutputFormat::Full,
            OutputFormat::Summary => mad_domain::OutputFormat::Summary,
            OutputFormat::Json => mad_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for mad
#[derive(Parser, Debug)]
#[command(name = "mad")]
#[command(author, version, about = "Multi-AI Debate - chat providers refine a topic until they agree")]
#[command(long_about = r#"
mad drives the web chats of ChatGPT, Claude and Gemini through a hosting
shell and lets them debate a topic.

The judge breaks the topic into elements. Participants then take turns
scoring and revising every open element. An element closes when its score
reaches the threshold, or when the judge finds its last three versions going
in circles.

Configuration files are loaded from (in priority order):
1. MAD_* environment variables
2. --config <path>     Explicit config file
3. ./mad.toml          Project-level config
4. ~/.config/mad/config.toml   Global config

Example:
  mad "Review this rate limiter design" --preset code_review
  mad -p claude -p gemini --judge chatgpt "Is SQLite enough for our queue?"
  mad --check-login
"#)]
pub struct Cli {
    /// The topic to debate (not required with --check-login or --show-config)
    pub topic: Option<String>,

    /// Extra context appended to the topic
    #[arg(long, value_name = "TEXT")]
    pub context: Option<String>,

    /// Element preset (code_review, qa_accuracy, decision, general)
    #[arg(long, value_name = "PRESET")]
    pub preset: Option<String>,

    /// Participating providers, in turn order (can be specified multiple times)
    #[arg(short, long = "participant", value_name = "PROVIDER")]
    pub participants: Vec<String>,

    /// Provider acting as judge
    #[arg(long, value_name = "PROVIDER")]
    pub judge: Option<String>,

    /// Score (0-100) at which an element is complete
    #[arg(long, value_name = "SCORE", value_parser = clap::value_parser!(u8).range(0..=100))]
    pub threshold: Option<u8>,

    /// Hosting shell bridge command (overrides [bridge] command)
    #[arg(long, value_name = "COMMAND")]
    pub bridge: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Report which providers are logged in and exit
    #[arg(long)]
    pub check_login: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_debate_invocation() {
        let cli = Cli::try_parse_from([
            "mad",
            "-p",
            "claude",
            "--participant",
            "gemini",
            "--judge",
            "chatgpt",
            "--threshold",
            "85",
            "-o",
            "json",
            "-vv",
            "Is SQLite enough?",
        ])
        .unwrap();

        assert_eq!(cli.topic.as_deref(), Some("Is SQLite enough?"));
        assert_eq!(cli.participants, vec!["claude", "gemini"]);
        assert_eq!(cli.judge.as_deref(), Some("chatgpt"));
        assert_eq!(cli.threshold, Some(85));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
        assert!(!cli.check_login);
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["mad", "--threshold", "101", "topic"]).is_err());
    }

    #[test]
    fn test_check_login_without_topic() {
        let cli = Cli::try_parse_from(["mad", "--check-login"]).unwrap();
        assert!(cli.check_login);
        assert!(cli.topic.is_none());
    }

    #[test]
    fn test_output_format_into_domain() {
        assert_eq!(
            mad_domain::OutputFormat::from(OutputFormat::Summary),
            mad_domain::OutputFormat::Summary
        );
    }
}
