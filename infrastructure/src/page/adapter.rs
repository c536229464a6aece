//! Scripted page adapter
//!
//! [`ScriptedPageAdapter`] drives a provider's chat page through a
//! [`ScriptChannel`]. Everything provider-specific (selectors, how text is
//! written into the editor, whether input is verified) comes from a
//! [`ProviderProfile`].

use super::resolver::SelectorResolver;
use super::scripts::{self, ScriptOutcome};
use super::selectors::selectors_for;
use super::wait::{WaitOptions, wait_for_condition};
use async_trait::async_trait;
use mad_application::{ChannelError, PageAdapter, ScriptChannel};
use mad_domain::{
    AdapterError, AdapterErrorCode, AdapterResult, Provider, ProviderSelectors, SelectorSet,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// What differs between providers
pub trait ProviderProfile: Send + Sync + 'static {
    fn provider(&self) -> Provider;

    fn selectors(&self) -> ProviderSelectors {
        selectors_for(self.provider())
    }

    /// Script writing `prompt` into the editor matched by `selector`.
    ///
    /// Must evaluate to `{ success, error? }`.
    fn input_script(&self, selector: &str, prompt: &str) -> String {
        scripts::set_text(selector, prompt)
    }

    /// Re-read the editor after input and fail when it is still empty
    fn verifies_input(&self) -> bool {
        false
    }
}

/// Delays and polling budgets used by [`ScriptedPageAdapter`]
#[derive(Debug, Clone)]
pub struct AdapterTimings {
    pub input_poll_interval: Duration,
    /// Phase 1 of `await_response`: waiting for typing to start
    pub typing_start_timeout: Duration,
    pub typing_start_interval: Duration,
    pub typing_start_attempts: u32,
    /// Phase 2 of `await_response`: waiting for typing to stop
    pub typing_stop_interval: Duration,
    pub typing_stop_attempts: u32,
    pub min_stop_timeout: Duration,
    /// Pause after typing stops so the page finishes rendering
    pub settle_delay: Duration,
    /// Pause before verifying input
    pub input_settle_delay: Duration,
    /// Responses at or below this many characters are not usable
    pub min_response_chars: usize,
}

impl Default for AdapterTimings {
    fn default() -> Self {
        Self {
            input_poll_interval: Duration::from_millis(500),
            typing_start_timeout: Duration::from_secs(10),
            typing_start_interval: Duration::from_millis(300),
            typing_start_attempts: 30,
            typing_stop_interval: Duration::from_millis(500),
            typing_stop_attempts: 120,
            min_stop_timeout: Duration::from_secs(5),
            settle_delay: Duration::from_secs(1),
            input_settle_delay: Duration::from_secs(1),
            min_response_chars: 10,
        }
    }
}

pub struct ScriptedPageAdapter<P: ProviderProfile> {
    profile: P,
    selectors: ProviderSelectors,
    resolver: SelectorResolver,
    timings: AdapterTimings,
}

impl<P: ProviderProfile> ScriptedPageAdapter<P> {
    pub fn new(profile: P, channel: Arc<dyn ScriptChannel>) -> Self {
        let provider = profile.provider();
        Self {
            selectors: profile.selectors(),
            resolver: SelectorResolver::new(channel, provider),
            profile,
            timings: AdapterTimings::default(),
        }
    }

    pub fn with_timings(mut self, timings: AdapterTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn with_selectors(mut self, selectors: ProviderSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    fn provider_name(&self) -> &'static str {
        self.profile.provider().as_str()
    }

    async fn execute(&self, script: &str) -> Result<serde_json::Value, String> {
        self.resolver
            .channel()
            .execute(script)
            .await
            .map_err(|e| e.to_string())
    }

    async fn run_action(&self, script: &str) -> ScriptOutcome {
        match self.execute(script).await {
            Ok(value) => ScriptOutcome::from_value(value),
            Err(e) => ScriptOutcome {
                success: false,
                error: Some(e),
            },
        }
    }

    async fn wait_for_presence(&self, set: &SelectorSet, options: WaitOptions) -> bool {
        let resolver = &self.resolver;
        wait_for_condition(
            move || async move { Ok::<_, ChannelError>(resolver.resolve(set).await.is_some()) },
            options,
        )
        .await
    }

    async fn wait_for_typing(&self, writing: bool, options: WaitOptions) -> bool {
        let resolver = &self.resolver;
        let set = &self.selectors.typing_indicator;
        wait_for_condition(
            move || async move { resolver.any_present(set).await.map(|present| present == writing) },
            options,
        )
        .await
    }

    async fn has_valid_response(&self) -> bool {
        match self.get_response().await {
            Ok(text) => text.trim().chars().count() > self.timings.min_response_chars,
            Err(_) => false,
        }
    }
}

#[async_trait]
impl<P: ProviderProfile> PageAdapter for ScriptedPageAdapter<P> {
    fn provider(&self) -> Provider {
        self.profile.provider()
    }

    async fn check_login(&self) -> AdapterResult<()> {
        match self.resolver.resolve(&self.selectors.login_marker).await {
            Some(_) => Ok(()),
            None => Err(AdapterError::not_logged_in(self.provider())),
        }
    }

    async fn prepare_input(&self, timeout: Duration) -> AdapterResult<()> {
        let ready = self
            .wait_for_presence(
                &self.selectors.input,
                WaitOptions::new(
                    timeout,
                    self.timings.input_poll_interval,
                    "input to be ready",
                ),
            )
            .await;

        if ready {
            Ok(())
        } else {
            Err(
                AdapterError::selector_not_found("input", &self.selectors.input.primary)
                    .with_detail("timeout_ms", timeout.as_millis() as u64),
            )
        }
    }

    async fn enter_prompt(&self, prompt: &str) -> AdapterResult<()> {
        let Some(selector) = self.resolver.resolve(&self.selectors.input).await else {
            return Err(AdapterError::selector_not_found(
                "input",
                &self.selectors.input.primary,
            ));
        };
        debug!(
            "[{}] entering prompt ({} chars)",
            self.provider_name(),
            prompt.chars().count()
        );

        let outcome = self
            .run_action(&self.profile.input_script(&selector, prompt))
            .await;
        if !outcome.success {
            return Err(AdapterError::new(
                AdapterErrorCode::InputFailed,
                format!(
                    "{} input failed: {}",
                    self.provider().display_name(),
                    outcome.error_message()
                ),
            )
            .with_detail("prompt_length", prompt.chars().count()));
        }

        if self.profile.verifies_input() {
            tokio::time::sleep(self.timings.input_settle_delay).await;
            let filled = matches!(
                self.execute(&scripts::has_text(&selector)).await,
                Ok(serde_json::Value::Bool(true))
            );
            if !filled {
                return Err(AdapterError::new(
                    AdapterErrorCode::VerificationFailed,
                    format!(
                        "{} input verification failed: input is empty",
                        self.provider().display_name()
                    ),
                )
                .with_detail("prompt_length", prompt.chars().count()));
            }
        }
        Ok(())
    }

    async fn submit_message(&self) -> AdapterResult<()> {
        if let Some(selector) = self.resolver.resolve(&self.selectors.send).await {
            let outcome = self.run_action(&scripts::click(&selector)).await;
            if outcome.success {
                return Ok(());
            }
            return Err(AdapterError::new(
                AdapterErrorCode::SendFailed,
                format!("Failed to send message: {}", outcome.error_message()),
            )
            .with_detail("selector", selector));
        }

        warn!("[{}] no send control found, trying Enter key", self.provider_name());
        if let Some(input) = self.resolver.resolve(&self.selectors.input).await
            && self.run_action(&scripts::press_enter(&input)).await.success
        {
            return Ok(());
        }

        Err(AdapterError::new(
            AdapterErrorCode::SendFailed,
            format!(
                "Send control not found for {}",
                self.provider().display_name()
            ),
        )
        .with_detail("selector", self.selectors.send.primary.as_str()))
    }

    async fn await_response(&self, timeout: Duration) -> AdapterResult<()> {
        info!(
            "[{}] awaiting response (timeout {:?})",
            self.provider_name(),
            timeout
        );
        let timings = &self.timings;

        let started = self
            .wait_for_typing(
                true,
                WaitOptions::new(
                    timings.typing_start_timeout,
                    timings.typing_start_interval,
                    "typing to start",
                )
                .with_max_attempts(timings.typing_start_attempts),
            )
            .await;

        if !started {
            warn!(
                "[{}] typing never started, checking for a response anyway",
                self.provider_name()
            );
            if self.has_valid_response().await {
                debug!("[{}] response already present", self.provider_name());
                return Ok(());
            }
        }

        let remaining = timeout
            .saturating_sub(timings.typing_start_timeout)
            .max(timings.min_stop_timeout);
        let finished = self
            .wait_for_typing(
                false,
                WaitOptions::new(remaining, timings.typing_stop_interval, "typing to finish")
                    .with_max_attempts(timings.typing_stop_attempts),
            )
            .await;

        if !finished {
            if self.has_valid_response().await {
                debug!(
                    "[{}] response present despite timeout",
                    self.provider_name()
                );
                return Ok(());
            }
            return Err(AdapterError::new(
                AdapterErrorCode::ResponseTimeout,
                format!("Response timeout for {}", self.provider().display_name()),
            )
            .with_detail("timeout_ms", timeout.as_millis() as u64)
            .with_detail("remaining_timeout_ms", remaining.as_millis() as u64));
        }

        tokio::time::sleep(timings.settle_delay).await;
        debug!("[{}] response complete", self.provider_name());
        Ok(())
    }

    async fn get_response(&self) -> AdapterResult<String> {
        let Some(selector) = self
            .resolver
            .resolve(&self.selectors.response_container)
            .await
        else {
            debug!("[{}] no response container found", self.provider_name());
            return Ok(String::new());
        };

        match self.execute(&scripts::last_text(&selector)).await {
            Ok(value) => Ok(value.as_str().unwrap_or_default().to_string()),
            Err(e) => Err(AdapterError::new(
                AdapterErrorCode::ExtractFailed,
                format!("Failed to extract response: {}", e),
            )
            .with_detail("selector", selector)),
        }
    }

    async fn is_writing(&self) -> bool {
        match self
            .resolver
            .any_present(&self.selectors.typing_indicator)
            .await
        {
            Ok(writing) => writing,
            Err(e) => {
                debug!("[{}] typing probe failed: {}", self.provider_name(), e);
                false
            }
        }
    }

    async fn response_length(&self) -> usize {
        let Some(selector) = self
            .resolver
            .resolve(&self.selectors.response_container)
            .await
        else {
            return 0;
        };
        self.execute(&scripts::last_text_length(&selector))
            .await
            .ok()
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as usize
    }
}
