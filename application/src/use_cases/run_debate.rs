//! Run Debate use case
//!
//! [`DebateController`] drives a whole debate: login check, element
//! breakdown by the judge, participant turns in order, and per-element
//! completion by threshold or cycle. Progress is published as
//! [`DebateEvent`]s on a channel so the loop stays free of UI concerns.
//!
//! One debate runs at a time per controller. Turns are sequential so every
//! version in the repository is causally ordered.

use crate::config::{CYCLE_WINDOW, DebateParams};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationEventKind, ConversationLogger, NoConversationLogger,
};
use crate::ports::debate_event::DebateEvent;
use crate::ports::page_adapter::{PageAdapter, PageAdapterRegistry};
use crate::ports::progress_logger::{NoProgressLogger, ProgressLogger};
use crate::ports::repository::{DebateRepository, RepositoryError};
use crate::use_cases::cycle_detector::CycleDetector;
use crate::use_cases::shared::{check_cancelled, exchange};
use crate::use_cases::status_poller::StatusPoller;
use mad_domain::{
    AdapterError, AdapterErrorCode, CompletionReason, DebateConfig, DebateElement, DebateProgress,
    DebateResult, DebateSession, DomainError, ElementId, ElementScoreUpdate, ElementVersion,
    ProgressPhase, PromptTemplate, Provider, SessionId, SessionStatus, parse_element_names,
    parse_element_scores,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can end a debate
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error("Invalid debate configuration: {0}")]
    InvalidConfig(#[from] DomainError),

    #[error("A debate is already running: {0}")]
    AlreadyRunning(SessionId),

    #[error("Not logged in to {}", provider_list(.providers))]
    NotLoggedIn { providers: Vec<Provider> },

    #[error("No page adapter for {0}")]
    AdapterUnavailable(Provider),

    #[error("{provider}: {source}")]
    Adapter {
        provider: Provider,
        #[source]
        source: AdapterError,
    },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Stopped after {0} iterations with elements still open")]
    IterationLimit(u32),

    #[error("Debate cancelled")]
    Cancelled,
}

fn provider_list(providers: &[Provider]) -> String {
    providers
        .iter()
        .map(Provider::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl RunDebateError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunDebateError::Cancelled)
    }

    /// Page failure category, if this error came from a page
    pub fn adapter_code(&self) -> Option<AdapterErrorCode> {
        match self {
            RunDebateError::Adapter { source, .. } => Some(source.code),
            RunDebateError::NotLoggedIn { .. } => Some(AdapterErrorCode::NotLoggedIn),
            _ => None,
        }
    }
}

/// What the controller is doing right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerStatus {
    Idle,
    Running {
        session_id: SessionId,
        iteration: u32,
    },
}

struct ActiveRun {
    session_id: SessionId,
    token: CancellationToken,
}

/// Releases the controller's single run slot when the run ends
struct ActiveRunGuard<'a> {
    slot: &'a Mutex<Option<ActiveRun>>,
}

impl Drop for ActiveRunGuard<'_> {
    fn drop(&mut self) {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

pub struct DebateController {
    registry: Arc<dyn PageAdapterRegistry>,
    repository: Arc<dyn DebateRepository>,
    tx: mpsc::UnboundedSender<DebateEvent>,
    params: DebateParams,
    progress_logger: Arc<dyn ProgressLogger>,
    conversation_logger: Arc<dyn ConversationLogger>,
    status_poller: Option<Arc<StatusPoller>>,
    active: Mutex<Option<ActiveRun>>,
}

impl DebateController {
    pub fn new(
        registry: Arc<dyn PageAdapterRegistry>,
        repository: Arc<dyn DebateRepository>,
        tx: mpsc::UnboundedSender<DebateEvent>,
    ) -> Self {
        Self {
            registry,
            repository,
            tx,
            params: DebateParams::default(),
            progress_logger: Arc::new(NoProgressLogger),
            conversation_logger: Arc::new(NoConversationLogger),
            status_poller: None,
            active: Mutex::new(None),
        }
    }

    pub fn with_params(mut self, params: DebateParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_progress_logger(mut self, logger: Arc<dyn ProgressLogger>) -> Self {
        self.progress_logger = logger;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Run `poller` over the debate's providers while a debate is in flight
    pub fn with_status_poller(mut self, poller: Arc<StatusPoller>) -> Self {
        self.status_poller = Some(poller);
        self
    }

    pub fn status(&self) -> ControllerStatus {
        let slot = self.active.lock().unwrap_or_else(|e| e.into_inner());
        match slot.as_ref() {
            None => ControllerStatus::Idle,
            Some(run) => ControllerStatus::Running {
                session_id: run.session_id.clone(),
                iteration: self
                    .repository
                    .session(&run.session_id)
                    .map(|s| s.current_iteration)
                    .unwrap_or(0),
            },
        }
    }

    /// Request cancellation of the running debate.
    ///
    /// Returns `false` when `session_id` is not the running debate. The
    /// current page operation finishes; no new turn starts.
    pub fn cancel(&self, session_id: &SessionId) -> bool {
        let slot = self.active.lock().unwrap_or_else(|e| e.into_inner());
        match slot.as_ref() {
            Some(run) if &run.session_id == session_id => {
                info!("Cancelling debate {}", session_id);
                run.token.cancel();
                true
            }
            _ => false,
        }
    }

    /// Run a debate to completion.
    pub async fn start(&self, config: DebateConfig) -> Result<DebateResult, RunDebateError> {
        config.validate()?;

        let session_id = SessionId::generate();
        let token = CancellationToken::new();
        let _guard = self.claim(&session_id, &token)?;

        let providers = config.all_providers();
        self.verify_login(&providers).await?;

        self.repository
            .create(DebateSession::with_id(session_id.clone(), config.clone()))?;
        self.repository
            .update_status(&session_id, SessionStatus::Running)?;

        info!(
            "Starting debate {} with {} participant(s), judge {}",
            session_id,
            config.participants.len(),
            config.judge
        );
        self.conversation_logger.log(ConversationEvent::new(
            ConversationEventKind::DebateStarted,
            serde_json::json!({
                "session_id": session_id.as_str(),
                "topic": config.topic,
                "preset": config.preset.as_str(),
                "participants": config.participants,
                "judge": config.judge,
                "completion_threshold": config.completion_threshold,
            }),
        ));
        self.emit(DebateEvent::Started {
            session_id: session_id.clone(),
            config: config.clone(),
        });

        if let Some(poller) = &self.status_poller {
            poller.set_active_providers(providers);
            poller.start();
        }

        let outcome = self.run(&session_id, &config, &token).await;

        if let Some(poller) = &self.status_poller {
            poller.stop();
        }

        self.finish(&session_id, outcome)
    }

    fn claim(
        &self,
        session_id: &SessionId,
        token: &CancellationToken,
    ) -> Result<ActiveRunGuard<'_>, RunDebateError> {
        let mut slot = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(run) = slot.as_ref() {
            return Err(RunDebateError::AlreadyRunning(run.session_id.clone()));
        }
        *slot = Some(ActiveRun {
            session_id: session_id.clone(),
            token: token.clone(),
        });
        Ok(ActiveRunGuard { slot: &self.active })
    }

    /// Every provider must have an adapter and a logged-in page
    async fn verify_login(&self, providers: &[Provider]) -> Result<(), RunDebateError> {
        let mut missing = Vec::new();
        for &provider in providers {
            match self.registry.adapter(provider) {
                Some(adapter) => {
                    if let Err(e) = adapter.check_login().await {
                        warn!("[{}] login check failed: {}", provider, e);
                        missing.push(provider);
                    }
                }
                None => {
                    warn!("[{}] no page adapter registered", provider);
                    missing.push(provider);
                }
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(RunDebateError::NotLoggedIn { providers: missing })
        }
    }

    /// Returns the number of iterations run
    async fn run(
        &self,
        session_id: &SessionId,
        config: &DebateConfig,
        token: &CancellationToken,
    ) -> Result<u32, RunDebateError> {
        let detector = CycleDetector::new(
            Arc::clone(&self.registry),
            config.judge,
            self.params.clone(),
        )
        .with_conversation_logger(Arc::clone(&self.conversation_logger));

        self.create_elements(session_id, config, token).await?;

        // Last version iteration each element was judged at
        let mut judged: HashMap<ElementId, u32> = HashMap::new();
        let mut iteration = 0u32;
        loop {
            for &participant in &config.participants {
                check_cancelled(token)?;

                let open = self.repository.incomplete_elements(session_id)?;
                if open.is_empty() {
                    return Ok(iteration);
                }
                if let Some(max) = self.params.max_iterations
                    && iteration >= max
                {
                    return Err(RunDebateError::IterationLimit(max));
                }

                iteration += 1;
                self.run_turn(session_id, config, participant, iteration, &open)
                    .await?;
                self.repository.update_iteration(session_id, iteration)?;
                self.close_elements(
                    session_id,
                    config,
                    iteration,
                    &detector,
                    &mut judged,
                    token,
                )
                .await?;
            }
        }
    }

    /// Ask the judge for the topic's elements, falling back to the preset
    async fn create_elements(
        &self,
        session_id: &SessionId,
        config: &DebateConfig,
        token: &CancellationToken,
    ) -> Result<(), RunDebateError> {
        check_cancelled(token)?;
        let judge = self.adapter(config.judge)?;

        let prompt = PromptTemplate::breakdown(config);
        let response = self
            .exchange_logged(session_id, judge.as_ref(), &prompt, 0)
            .await?;

        let mut names = parse_element_names(&response);
        if names.is_empty() {
            warn!(
                "[{}] no element breakdown in judge response, using '{}' preset elements",
                config.judge, config.preset
            );
            names = config
                .preset
                .default_elements()
                .iter()
                .map(|name| name.to_string())
                .collect();
        }

        info!("Debating {} element(s): {}", names.len(), names.join(", "));
        self.conversation_logger.log(ConversationEvent::new(
            ConversationEventKind::ElementBreakdown,
            serde_json::json!({
                "session_id": session_id.as_str(),
                "judge": config.judge,
                "elements": names,
            }),
        ));
        self.repository.create_elements(session_id, &names)?;
        Ok(())
    }

    async fn run_turn(
        &self,
        session_id: &SessionId,
        config: &DebateConfig,
        participant: Provider,
        iteration: u32,
        open: &[DebateElement],
    ) -> Result<(), RunDebateError> {
        info!("Iteration {} ({})", iteration, participant);
        self.progress_logger.log_iteration(iteration, participant);

        let adapter = self.adapter(participant)?;
        let prompt = PromptTemplate::participant_turn(config, open, iteration);
        let response = self
            .exchange_logged(session_id, adapter.as_ref(), &prompt, iteration)
            .await?;

        self.emit_progress(session_id, iteration, participant, ProgressPhase::Scoring);
        let scores = parse_element_scores(&response);
        if scores.is_empty() {
            warn!("[{}] response contained no element scores", participant);
        }

        let mut scored: Vec<ElementId> = Vec::new();
        for parsed in scores {
            let Some(element) = open
                .iter()
                .find(|e| e.name.eq_ignore_ascii_case(&parsed.name))
            else {
                debug!(
                    "[{}] ignoring score for unknown or closed element '{}'",
                    participant, parsed.name
                );
                continue;
            };
            if scored.contains(&element.id) {
                debug!("[{}] duplicate score for '{}'", participant, element.name);
                continue;
            }

            let version = ElementVersion::new(
                iteration,
                parsed.version_content(),
                parsed.score,
                participant,
            );
            let updated = self.repository.update_element_score(&element.id, version)?;
            scored.push(element.id.clone());

            debug!("[{}] {} scored {}", participant, updated.name, parsed.score);
            self.progress_logger
                .log_element_score(&updated.name, parsed.score, false);
            self.emit(DebateEvent::ElementScore(ElementScoreUpdate {
                element_id: updated.id.clone(),
                element_name: updated.name.clone(),
                score: parsed.score,
                critique: parsed.critique.clone(),
                iteration,
            }));
        }

        Ok(())
    }

    /// Close elements that crossed the threshold, then check the rest for cycles.
    ///
    /// An element goes to the judge only when its window gained a version
    /// since the last check.
    async fn close_elements(
        &self,
        session_id: &SessionId,
        config: &DebateConfig,
        iteration: u32,
        detector: &CycleDetector,
        judged: &mut HashMap<ElementId, u32>,
        token: &CancellationToken,
    ) -> Result<(), RunDebateError> {
        let mut remaining = Vec::new();
        for element in self.repository.incomplete_elements(session_id)? {
            if !element.version_history.is_empty()
                && element.current_score >= config.completion_threshold
            {
                self.complete(session_id, &element, CompletionReason::Threshold)?;
            } else {
                remaining.push(element);
            }
        }

        for element in remaining {
            if element.version_history.len() < CYCLE_WINDOW {
                continue;
            }
            let Some(latest) = element.version_history.last().map(|v| v.iteration) else {
                continue;
            };
            if judged.get(&element.id) == Some(&latest) {
                debug!("'{}' unchanged since its last cycle check", element.name);
                continue;
            }
            judged.insert(element.id.clone(), latest);

            check_cancelled(token)?;
            self.emit_progress(
                session_id,
                iteration,
                detector.judge(),
                ProgressPhase::CycleCheck,
            );

            let versions = self.repository.last_versions(&element.id, CYCLE_WINDOW)?;
            let verdict = detector.detect(&element.name, &versions).await;
            if verdict.is_cycle {
                self.progress_logger.log_cycle_detected(&element.name);
                self.complete(session_id, &element, CompletionReason::Cycle)?;
            }
        }

        Ok(())
    }

    fn complete(
        &self,
        session_id: &SessionId,
        element: &DebateElement,
        reason: CompletionReason,
    ) -> Result<(), RunDebateError> {
        let done = self.repository.mark_element_complete(&element.id, reason)?;
        info!(
            "Element '{}' complete ({}, score {})",
            done.name, reason, done.current_score
        );
        if reason == CompletionReason::Threshold {
            self.progress_logger
                .log_element_score(&done.name, done.current_score, true);
        }
        self.conversation_logger.log(ConversationEvent::new(
            ConversationEventKind::ElementCompleted,
            serde_json::json!({
                "session_id": session_id.as_str(),
                "element": done.name,
                "score": done.current_score,
                "reason": reason.as_str(),
                "versions": done.version_history.len(),
            }),
        ));
        self.emit(DebateEvent::ElementCompleted {
            element_id: done.id,
            element_name: done.name,
            score: done.current_score,
            reason,
        });
        Ok(())
    }

    /// Settle the session status and emit the terminal event
    fn finish(
        &self,
        session_id: &SessionId,
        outcome: Result<u32, RunDebateError>,
    ) -> Result<DebateResult, RunDebateError> {
        match outcome {
            Ok(iterations) => {
                self.repository
                    .update_status(session_id, SessionStatus::Completed)?;
                let result = DebateResult::new(
                    session_id.clone(),
                    self.repository.all_elements(session_id)?,
                    iterations,
                );
                info!(
                    "Debate {} completed after {} iteration(s)",
                    session_id, iterations
                );
                self.conversation_logger.log(ConversationEvent::new(
                    ConversationEventKind::DebateCompleted,
                    serde_json::json!({
                        "session_id": session_id.as_str(),
                        "total_iterations": iterations,
                    }),
                ));
                self.emit(DebateEvent::Completed(result.clone()));
                Ok(result)
            }
            Err(RunDebateError::Cancelled) => {
                let iteration = self
                    .repository
                    .session(session_id)
                    .map(|s| s.current_iteration)
                    .unwrap_or(0);
                if let Err(e) = self
                    .repository
                    .update_status(session_id, SessionStatus::Cancelled)
                {
                    warn!("Failed to mark {} cancelled: {}", session_id, e);
                }
                info!("Debate {} cancelled at iteration {}", session_id, iteration);
                self.emit(DebateEvent::Cancelled {
                    session_id: session_id.clone(),
                    iteration,
                });
                Err(RunDebateError::Cancelled)
            }
            Err(error) => {
                warn!("Debate {} failed: {}", session_id, error);
                if let Err(e) = self
                    .repository
                    .update_status(session_id, SessionStatus::Error)
                {
                    warn!("Failed to mark {} as errored: {}", session_id, e);
                }
                self.emit(DebateEvent::Error {
                    session_id: Some(session_id.clone()),
                    code: error.adapter_code(),
                    message: error.to_string(),
                });
                Err(error)
            }
        }
    }

    fn adapter(&self, provider: Provider) -> Result<Arc<dyn PageAdapter>, RunDebateError> {
        self.registry
            .adapter(provider)
            .ok_or(RunDebateError::AdapterUnavailable(provider))
    }

    /// Exchange with progress events and transcript entries
    async fn exchange_logged(
        &self,
        session_id: &SessionId,
        adapter: &dyn PageAdapter,
        prompt: &str,
        iteration: u32,
    ) -> Result<String, RunDebateError> {
        let provider = adapter.provider();
        self.conversation_logger.log(ConversationEvent::new(
            ConversationEventKind::PromptSent,
            serde_json::json!({
                "session_id": session_id.as_str(),
                "provider": provider,
                "iteration": iteration,
                "prompt": prompt,
            }),
        ));

        let response = exchange(adapter, prompt, &self.params, |phase| {
            self.emit_progress(session_id, iteration, provider, phase)
        })
        .await
        .map_err(|source| RunDebateError::Adapter { provider, source })?;

        self.conversation_logger.log(ConversationEvent::new(
            ConversationEventKind::ResponseReceived,
            serde_json::json!({
                "session_id": session_id.as_str(),
                "provider": provider,
                "iteration": iteration,
                "response": response,
            }),
        ));
        Ok(response)
    }

    fn emit_progress(
        &self,
        session_id: &SessionId,
        iteration: u32,
        provider: Provider,
        phase: ProgressPhase,
    ) {
        self.emit(DebateEvent::Progress(DebateProgress {
            session_id: session_id.clone(),
            iteration,
            provider,
            phase,
        }));
    }

    fn emit(&self, event: DebateEvent) {
        // A dropped receiver only means nobody is watching
        let _ = self.tx.send(event);
    }
}
