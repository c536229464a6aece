//! Presentation-level configuration
//!
//! Resolved output settings after merging the `[output]` file section with
//! CLI flags.

use mad_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show the spinner and progress lines
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// CLI values win over file values
    pub fn resolve(
        file_format: Option<OutputFormat>,
        file_color: bool,
        file_show_progress: bool,
        cli_format: Option<OutputFormat>,
        quiet: bool,
    ) -> Self {
        Self {
            format: cli_format.or(file_format).unwrap_or_default(),
            color: file_color,
            show_progress: file_show_progress && !quiet,
        }
    }

    /// Apply the color choice to the process-wide `colored` switch
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_file() {
        let config = OutputConfig::resolve(
            Some(OutputFormat::Full),
            true,
            true,
            Some(OutputFormat::Json),
            false,
        );
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.show_progress);
    }

    #[test]
    fn test_falls_back_to_default_format() {
        let config = OutputConfig::resolve(None, false, true, None, true);
        assert_eq!(config.format, OutputFormat::Summary);
        assert!(!config.color);
        assert!(!config.show_progress);
    }
}
