//! Presentation layer for mad
//!
//! This crate contains CLI definitions, result formatters, the console
//! progress logger and the debate event renderer.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use config::OutputConfig;
pub use output::{console::ResultFormatter, formatter::OutputFormatter};
pub use progress::{
    logger::ConsoleProgressLogger,
    reporter::{DebateOutcome, EventRenderer},
};
