//! Shared utilities for use cases.
//!
//! Cancellation checking and the prompt/response exchange used by both the
//! debate controller and the cycle detector.

use crate::config::DebateParams;
use crate::ports::page_adapter::PageAdapter;
use crate::use_cases::run_debate::RunDebateError;
use mad_domain::{AdapterResult, ProgressPhase};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Check if cancellation has been requested.
///
/// Returns `Err(RunDebateError::Cancelled)` if the token is cancelled.
pub(crate) fn check_cancelled(token: &CancellationToken) -> Result<(), RunDebateError> {
    if token.is_cancelled() {
        return Err(RunDebateError::Cancelled);
    }
    Ok(())
}

/// Send `prompt` through `adapter` and return the extracted answer.
///
/// `on_phase` is called as the exchange enters each phase, before the
/// corresponding page operation.
pub(crate) async fn exchange(
    adapter: &dyn PageAdapter,
    prompt: &str,
    params: &DebateParams,
    mut on_phase: impl FnMut(ProgressPhase) + Send,
) -> AdapterResult<String> {
    let provider = adapter.provider();

    on_phase(ProgressPhase::Input);
    adapter.prepare_input(params.input_timeout).await?;
    adapter.enter_prompt(prompt).await?;
    adapter.submit_message().await?;
    debug!("[{}] prompt submitted ({} chars)", provider, prompt.chars().count());

    on_phase(ProgressPhase::Waiting);
    adapter.await_response(params.response_timeout).await?;

    on_phase(ProgressPhase::Extracting);
    let response = adapter.get_response().await?;
    debug!("[{}] response extracted ({} chars)", provider, response.chars().count());
    Ok(response)
}
