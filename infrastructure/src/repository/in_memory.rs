//! In-memory debate repository.

use mad_application::{DebateRepository, RepositoryError};
use mad_domain::{
    CompletionReason, DebateElement, DebateSession, DomainError, ElementId, ElementVersion,
    SessionId, SessionStatus,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Default)]
struct State {
    sessions: HashMap<SessionId, DebateSession>,
    elements: HashMap<ElementId, DebateElement>,
    /// Element ids per session, in creation order
    element_order: HashMap<SessionId, Vec<ElementId>>,
}

impl State {
    fn session_mut(&mut self, id: &SessionId) -> Result<&mut DebateSession, RepositoryError> {
        self.sessions
            .get_mut(id)
            .ok_or_else(|| RepositoryError::SessionNotFound(id.clone()))
    }

    fn element_mut(&mut self, id: &ElementId) -> Result<&mut DebateElement, RepositoryError> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| RepositoryError::ElementNotFound(id.clone()))
    }

    fn elements_of(&self, session_id: &SessionId) -> Result<Vec<DebateElement>, RepositoryError> {
        if !self.sessions.contains_key(session_id) {
            return Err(RepositoryError::SessionNotFound(session_id.clone()));
        }
        Ok(self
            .element_order
            .get(session_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.elements.get(id).cloned())
            .collect())
    }
}

/// [`DebateRepository`] keeping everything in process memory
///
/// A single mutex guards all maps; it is never held across an await.
#[derive(Default)]
pub struct InMemoryDebateRepository {
    state: Mutex<State>,
}

impl InMemoryDebateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn version_error(element: &ElementId, error: DomainError) -> RepositoryError {
    match error {
        DomainError::NonIncreasingIteration { last, got, .. } => {
            RepositoryError::NonIncreasingIteration {
                element: element.clone(),
                last,
                got,
            }
        }
        _ => RepositoryError::ElementClosed(element.clone()),
    }
}

impl DebateRepository for InMemoryDebateRepository {
    fn create(&self, session: DebateSession) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        if state.sessions.contains_key(&session.id) {
            return Err(RepositoryError::SessionExists(session.id));
        }
        debug!("Repository: created session {}", session.id);
        state.element_order.insert(session.id.clone(), Vec::new());
        state.sessions.insert(session.id.clone(), session);
        Ok(())
    }

    fn session(&self, session_id: &SessionId) -> Result<DebateSession, RepositoryError> {
        self.lock()
            .sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| RepositoryError::SessionNotFound(session_id.clone()))
    }

    fn create_elements(
        &self,
        session_id: &SessionId,
        names: &[String],
    ) -> Result<Vec<DebateElement>, RepositoryError> {
        let mut state = self.lock();
        if !state.sessions.contains_key(session_id) {
            return Err(RepositoryError::SessionNotFound(session_id.clone()));
        }

        let mut created = Vec::with_capacity(names.len());
        for name in names {
            let element = DebateElement::new(session_id, name.clone());
            if state.elements.contains_key(&element.id) {
                debug!("Repository: element {} already exists", element.id);
                continue;
            }
            state
                .element_order
                .entry(session_id.clone())
                .or_default()
                .push(element.id.clone());
            state.elements.insert(element.id.clone(), element.clone());
            created.push(element);
        }
        Ok(created)
    }

    fn update_element_score(
        &self,
        element_id: &ElementId,
        version: ElementVersion,
    ) -> Result<DebateElement, RepositoryError> {
        let mut state = self.lock();
        let element = state.element_mut(element_id)?;
        element
            .record_version(version)
            .map_err(|e| version_error(element_id, e))?;
        Ok(element.clone())
    }

    fn mark_element_complete(
        &self,
        element_id: &ElementId,
        reason: CompletionReason,
    ) -> Result<DebateElement, RepositoryError> {
        let mut state = self.lock();
        let element = state.element_mut(element_id)?;
        element.complete(reason);
        Ok(element.clone())
    }

    fn last_versions(
        &self,
        element_id: &ElementId,
        n: usize,
    ) -> Result<Vec<ElementVersion>, RepositoryError> {
        let mut state = self.lock();
        Ok(state.element_mut(element_id)?.last_versions(n).to_vec())
    }

    fn incomplete_elements(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<DebateElement>, RepositoryError> {
        Ok(self
            .lock()
            .elements_of(session_id)?
            .into_iter()
            .filter(DebateElement::is_open)
            .collect())
    }

    fn all_elements(&self, session_id: &SessionId) -> Result<Vec<DebateElement>, RepositoryError> {
        self.lock().elements_of(session_id)
    }

    fn update_iteration(
        &self,
        session_id: &SessionId,
        iteration: u32,
    ) -> Result<(), RepositoryError> {
        self.lock().session_mut(session_id)?.current_iteration = iteration;
        Ok(())
    }

    fn update_status(
        &self,
        session_id: &SessionId,
        status: SessionStatus,
    ) -> Result<(), RepositoryError> {
        self.lock()
            .session_mut(session_id)?
            .transition(status)
            .map_err(|e| RepositoryError::InvalidTransition(e.to_string()))
    }

    fn clear(&self) {
        let mut state = self.lock();
        debug!(
            "Repository: clearing {} session(s), {} element(s)",
            state.sessions.len(),
            state.elements.len()
        );
        *state = State::default();
    }
}
