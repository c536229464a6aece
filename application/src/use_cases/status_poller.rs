//! Status Poller
//!
//! Samples each active provider's generation activity on a fixed interval
//! and hands it to the [`ProgressLogger`]. It only reads adapter state and
//! never touches the repository, so it runs alongside the debate loop
//! without coordination.

use crate::ports::page_adapter::PageAdapterRegistry;
use crate::ports::progress_logger::ProgressLogger;
use mad_domain::{LlmStatus, Provider};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

struct PollerState {
    registry: Arc<dyn PageAdapterRegistry>,
    logger: Arc<dyn ProgressLogger>,
    active: Mutex<Vec<Provider>>,
}

impl PollerState {
    async fn poll(&self) -> Vec<LlmStatus> {
        let providers = self
            .active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        let mut statuses = Vec::with_capacity(providers.len());
        for provider in providers {
            let Some(adapter) = self.registry.adapter(provider) else {
                trace!("[{}] no adapter to poll", provider);
                continue;
            };
            let is_writing = adapter.is_writing().await;
            let length = adapter.response_length().await;
            let status = LlmStatus::new(provider, is_writing, length);
            self.logger.log_status(&status);
            statuses.push(status);
        }
        statuses
    }
}

struct RunningTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct StatusPoller {
    state: Arc<PollerState>,
    interval: Duration,
    task: Mutex<Option<RunningTask>>,
}

impl StatusPoller {
    pub fn new(
        registry: Arc<dyn PageAdapterRegistry>,
        logger: Arc<dyn ProgressLogger>,
        interval: Duration,
    ) -> Self {
        Self {
            state: Arc::new(PollerState {
                registry,
                logger,
                active: Mutex::new(Vec::new()),
            }),
            interval,
            task: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Replace the set of providers sampled on each tick
    pub fn set_active_providers(&self, providers: Vec<Provider>) {
        *self
            .state
            .active
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = providers;
    }

    /// Start ticking. A poller that is already running keeps its task.
    pub fn start(&self) {
        let mut task = self.task.lock().unwrap_or_else(|e| e.into_inner());
        if task.as_ref().is_some_and(|t| !t.handle.is_finished()) {
            return;
        }

        let token = CancellationToken::new();
        let state = Arc::clone(&self.state);
        let interval = self.interval;
        let child = token.clone();

        let handle = tokio::spawn(async move {
            debug!("Status poller started ({:?} interval)", interval);
            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {
                        state.poll().await;
                    }
                }
            }
            debug!("Status poller stopped");
        });

        *task = Some(RunningTask { token, handle });
    }

    /// Stop ticking. Safe to call when not running.
    pub fn stop(&self) {
        if let Some(task) = self
            .task
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            task.token.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(|t| !t.token.is_cancelled() && !t.handle.is_finished())
    }

    /// Sample every active provider once
    pub async fn poll_once(&self) -> Vec<LlmStatus> {
        self.state.poll().await
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
