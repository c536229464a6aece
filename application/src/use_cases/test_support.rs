//! Test doubles shared by use case tests.

use crate::ports::page_adapter::PageAdapter;
use crate::ports::progress_logger::ProgressLogger;
use crate::ports::repository::{DebateRepository, RepositoryError};
use async_trait::async_trait;
use mad_domain::{
    AdapterError, AdapterResult, CompletionReason, DebateElement, DebateSession, DomainError,
    ElementId, ElementVersion, LlmStatus, Provider, SessionId, SessionStatus,
};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

// ==================== MockAdapter ====================

/// Page adapter answering from a queue of canned responses.
///
/// `submit_message` moves the next response onto the page; `get_response`
/// returns whatever is on the page.
pub(crate) struct MockAdapter {
    provider: Provider,
    logged_in: bool,
    responses: Mutex<VecDeque<String>>,
    page: Mutex<String>,
    prompts: Mutex<Vec<String>>,
    await_error: Option<AdapterError>,
    delay: Duration,
    writing: bool,
}

impl MockAdapter {
    pub(crate) fn new(provider: Provider) -> Self {
        Self {
            provider,
            logged_in: true,
            responses: Mutex::new(VecDeque::new()),
            page: Mutex::new(String::new()),
            prompts: Mutex::new(Vec::new()),
            await_error: None,
            delay: Duration::ZERO,
            writing: false,
        }
    }

    pub(crate) fn with_responses<I, S>(self, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.responses
            .lock()
            .unwrap()
            .extend(responses.into_iter().map(Into::into));
        self
    }

    pub(crate) fn logged_out(mut self) -> Self {
        self.logged_in = false;
        self
    }

    pub(crate) fn failing_await(mut self, error: AdapterError) -> Self {
        self.await_error = Some(error);
        self
    }

    /// Make every `await_response` take `delay`
    pub(crate) fn slow(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn writing(mut self) -> Self {
        self.writing = true;
        self
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageAdapter for MockAdapter {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn check_login(&self) -> AdapterResult<()> {
        if self.logged_in {
            Ok(())
        } else {
            Err(AdapterError::not_logged_in(self.provider))
        }
    }

    async fn prepare_input(&self, _timeout: Duration) -> AdapterResult<()> {
        Ok(())
    }

    async fn enter_prompt(&self, prompt: &str) -> AdapterResult<()> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(())
    }

    async fn submit_message(&self) -> AdapterResult<()> {
        let next = self.responses.lock().unwrap().pop_front().unwrap_or_default();
        *self.page.lock().unwrap() = next;
        Ok(())
    }

    async fn await_response(&self, _timeout: Duration) -> AdapterResult<()> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.await_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn get_response(&self) -> AdapterResult<String> {
        Ok(self.page.lock().unwrap().clone())
    }

    async fn is_writing(&self) -> bool {
        self.writing
    }

    async fn response_length(&self) -> usize {
        self.page.lock().unwrap().chars().count()
    }
}

// ==================== MemoryRepository ====================

#[derive(Default)]
struct MemoryState {
    sessions: Vec<DebateSession>,
    elements: Vec<(SessionId, DebateElement)>,
}

/// Minimal repository backed by vectors.
#[derive(Default)]
pub(crate) struct MemoryRepository {
    state: Mutex<MemoryState>,
}

impl MemoryRepository {
    pub(crate) fn session_count(&self) -> usize {
        self.state.lock().unwrap().sessions.len()
    }

    pub(crate) fn element_count(&self) -> usize {
        self.state.lock().unwrap().elements.len()
    }

    fn with_element<T>(
        &self,
        id: &ElementId,
        f: impl FnOnce(&mut DebateElement) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let (_, element) = state
            .elements
            .iter_mut()
            .find(|(_, e)| &e.id == id)
            .ok_or_else(|| RepositoryError::ElementNotFound(id.clone()))?;
        f(element)
    }
}

impl DebateRepository for MemoryRepository {
    fn create(&self, session: DebateSession) -> Result<(), RepositoryError> {
        self.state.lock().unwrap().sessions.push(session);
        Ok(())
    }

    fn session(&self, session_id: &SessionId) -> Result<DebateSession, RepositoryError> {
        self.state
            .lock()
            .unwrap()
            .sessions
            .iter()
            .find(|s| &s.id == session_id)
            .cloned()
            .ok_or_else(|| RepositoryError::SessionNotFound(session_id.clone()))
    }

    fn create_elements(
        &self,
        session_id: &SessionId,
        names: &[String],
    ) -> Result<Vec<DebateElement>, RepositoryError> {
        let created: Vec<DebateElement> = names
            .iter()
            .map(|name| DebateElement::new(session_id, name.clone()))
            .collect();
        let mut state = self.state.lock().unwrap();
        for element in &created {
            state.elements.push((session_id.clone(), element.clone()));
        }
        Ok(created)
    }

    fn update_element_score(
        &self,
        element_id: &ElementId,
        version: ElementVersion,
    ) -> Result<DebateElement, RepositoryError> {
        self.with_element(element_id, |element| {
            element.record_version(version).map_err(|e| match e {
                DomainError::NonIncreasingIteration { last, got, .. } => {
                    RepositoryError::NonIncreasingIteration {
                        element: element_id.clone(),
                        last,
                        got,
                    }
                }
                _ => RepositoryError::ElementClosed(element_id.clone()),
            })?;
            Ok(element.clone())
        })
    }

    fn mark_element_complete(
        &self,
        element_id: &ElementId,
        reason: CompletionReason,
    ) -> Result<DebateElement, RepositoryError> {
        self.with_element(element_id, |element| {
            element.complete(reason);
            Ok(element.clone())
        })
    }

    fn last_versions(
        &self,
        element_id: &ElementId,
        n: usize,
    ) -> Result<Vec<ElementVersion>, RepositoryError> {
        self.with_element(element_id, |element| Ok(element.last_versions(n).to_vec()))
    }

    fn incomplete_elements(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<DebateElement>, RepositoryError> {
        Ok(self
            .all_elements(session_id)?
            .into_iter()
            .filter(DebateElement::is_open)
            .collect())
    }

    fn all_elements(&self, session_id: &SessionId) -> Result<Vec<DebateElement>, RepositoryError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .elements
            .iter()
            .filter(|(sid, _)| sid == session_id)
            .map(|(_, e)| e.clone())
            .collect())
    }

    fn update_iteration(
        &self,
        session_id: &SessionId,
        iteration: u32,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let session = state
            .sessions
            .iter_mut()
            .find(|s| &s.id == session_id)
            .ok_or_else(|| RepositoryError::SessionNotFound(session_id.clone()))?;
        session.current_iteration = iteration;
        Ok(())
    }

    fn update_status(
        &self,
        session_id: &SessionId,
        status: SessionStatus,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let session = state
            .sessions
            .iter_mut()
            .find(|s| &s.id == session_id)
            .ok_or_else(|| RepositoryError::SessionNotFound(session_id.clone()))?;
        session
            .transition(status)
            .map_err(|e| RepositoryError::InvalidTransition(e.to_string()))
    }

    fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.sessions.clear();
        state.elements.clear();
    }
}

// ==================== RecordingLogger ====================

/// Progress logger keeping every line it was given.
#[derive(Default)]
pub(crate) struct RecordingLogger {
    pub(crate) lines: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl ProgressLogger for RecordingLogger {
    fn log_status(&self, status: &LlmStatus) {
        self.lines.lock().unwrap().push(format!(
            "status {} writing={} len={}",
            status.provider, status.is_writing, status.token_count
        ));
    }

    fn log_element_score(&self, name: &str, score: u8, completed: bool) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("score {} {} {}", name, score, completed));
    }

    fn log_cycle_detected(&self, name: &str) {
        self.lines.lock().unwrap().push(format!("cycle {}", name));
    }

    fn log_iteration(&self, iteration: u32, provider: Provider) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("iteration {} {}", iteration, provider));
    }
}
