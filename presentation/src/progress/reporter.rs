//! Renders debate events while a debate runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use mad_application::DebateEvent;
use mad_domain::{DebateResult, preview};
use std::time::Duration;
use tokio::sync::mpsc;

const CRITIQUE_PREVIEW_CHARS: usize = 60;

/// How the event stream ended
#[derive(Debug, Clone, PartialEq)]
pub enum DebateOutcome {
    Completed(DebateResult),
    Cancelled { iteration: u32 },
    Failed(String),
    /// The controller dropped its sender without a terminal event
    Disconnected,
}

/// Consumes [`DebateEvent`]s and keeps a spinner in sync with the debate.
pub struct EventRenderer {
    spinner: ProgressBar,
}

impl EventRenderer {
    /// Renderer with a live spinner on stderr
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.enable_steady_tick(Duration::from_millis(120));
        Self { spinner }
    }

    /// Renderer that draws nothing (for `--quiet` and JSON output)
    pub fn hidden() -> Self {
        Self {
            spinner: ProgressBar::hidden(),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Handle for printing above the spinner
    pub fn spinner(&self) -> ProgressBar {
        self.spinner.clone()
    }

    /// Drain events until a terminal one arrives or the sender is dropped
    pub async fn run(&self, mut rx: mpsc::UnboundedReceiver<DebateEvent>) -> DebateOutcome {
        while let Some(event) = rx.recv().await {
            if let Some(outcome) = self.handle(&event) {
                return outcome;
            }
        }
        self.spinner.finish_and_clear();
        DebateOutcome::Disconnected
    }

    /// Apply one event to the display; returns the outcome for terminal events
    pub fn handle(&self, event: &DebateEvent) -> Option<DebateOutcome> {
        match event {
            DebateEvent::Started { session_id, config } => {
                self.spinner.set_prefix(session_id.to_string());
                self.println(format!(
                    "{} {} ({} participants, judge {})",
                    "Debating:".cyan().bold(),
                    preview(&config.topic, 80),
                    config.participants.len(),
                    config.judge.as_str()
                ));
                None
            }
            DebateEvent::Progress(progress) => {
                self.spinner.set_message(format!(
                    "#{} {}: {}",
                    progress.iteration,
                    progress.provider.as_str(),
                    progress.phase
                ));
                None
            }
            DebateEvent::ElementScore(update) => {
                self.spinner.set_message(format!(
                    "#{} {} {}: {}",
                    update.iteration,
                    update.element_name,
                    update.score,
                    preview(&update.critique, CRITIQUE_PREVIEW_CHARS)
                ));
                None
            }
            DebateEvent::ElementCompleted {
                element_name,
                score,
                reason,
                ..
            } => {
                self.println(format!(
                    "{} {} ({}, {})",
                    "✓".green(),
                    element_name.bold(),
                    score,
                    reason.as_str()
                ));
                None
            }
            DebateEvent::Completed(result) => {
                self.spinner.finish_and_clear();
                Some(DebateOutcome::Completed(result.clone()))
            }
            DebateEvent::Cancelled { iteration, .. } => {
                self.spinner.finish_and_clear();
                Some(DebateOutcome::Cancelled {
                    iteration: *iteration,
                })
            }
            DebateEvent::Error { code, message, .. } => {
                self.spinner.finish_and_clear();
                let message = match code {
                    Some(code) => format!("[{}] {}", code.as_str(), message),
                    None => message.clone(),
                };
                Some(DebateOutcome::Failed(message))
            }
        }
    }

    fn println(&self, line: String) {
        self.spinner.suspend(|| eprintln!("{}", line));
    }
}

impl Default for EventRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mad_domain::{
        AdapterErrorCode, DebateConfig, DebateProgress, ProgressPhase, Provider, SessionId,
    };

    fn session() -> SessionId {
        SessionId::new("debate-1")
    }

    #[tokio::test]
    async fn test_run_stops_at_completed() {
        let (tx, rx) = mpsc::unbounded_channel();
        let config = DebateConfig::new("topic", vec![Provider::ChatGpt], Provider::Claude);
        tx.send(DebateEvent::Started {
            session_id: session(),
            config,
        })
        .unwrap();
        tx.send(DebateEvent::Progress(DebateProgress {
            session_id: session(),
            iteration: 1,
            provider: Provider::ChatGpt,
            phase: ProgressPhase::Waiting,
        }))
        .unwrap();
        let result = DebateResult::new(session(), Vec::new(), 1);
        tx.send(DebateEvent::Completed(result.clone())).unwrap();
        tx.send(DebateEvent::Cancelled {
            session_id: session(),
            iteration: 2,
        })
        .unwrap();

        let outcome = EventRenderer::hidden().run(rx).await;
        assert_eq!(outcome, DebateOutcome::Completed(result));
    }

    #[tokio::test]
    async fn test_run_reports_dropped_sender() {
        let (tx, rx) = mpsc::unbounded_channel::<DebateEvent>();
        drop(tx);
        assert_eq!(
            EventRenderer::hidden().run(rx).await,
            DebateOutcome::Disconnected
        );
    }

    #[test]
    fn test_error_includes_code() {
        let renderer = EventRenderer::hidden();
        let outcome = renderer.handle(&DebateEvent::Error {
            session_id: Some(session()),
            code: Some(AdapterErrorCode::ResponseTimeout),
            message: "claude did not answer".into(),
        });
        assert_eq!(
            outcome,
            Some(DebateOutcome::Failed(
                "[RESPONSE_TIMEOUT] claude did not answer".into()
            ))
        );
    }

    #[test]
    fn test_cancelled_outcome() {
        let renderer = EventRenderer::hidden();
        let outcome = renderer.handle(&DebateEvent::Cancelled {
            session_id: session(),
            iteration: 4,
        });
        assert_eq!(outcome, Some(DebateOutcome::Cancelled { iteration: 4 }));
    }
}
