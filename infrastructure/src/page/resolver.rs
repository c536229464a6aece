//! Selector resolution with fallbacks.

use super::scripts;
use mad_application::{ChannelError, ScriptChannel};
use mad_domain::{Provider, SelectorSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Finds the first candidate of a [`SelectorSet`] present on the page
pub struct SelectorResolver {
    channel: Arc<dyn ScriptChannel>,
    provider: Provider,
}

impl SelectorResolver {
    pub fn new(channel: Arc<dyn ScriptChannel>, provider: Provider) -> Self {
        Self { channel, provider }
    }

    pub fn channel(&self) -> &Arc<dyn ScriptChannel> {
        &self.channel
    }

    /// Probe candidates in order, one script each, and return the first
    /// that matches. Failing probes count as "not found".
    pub async fn resolve(&self, set: &SelectorSet) -> Option<String> {
        for selector in set.candidates() {
            match self.channel.execute(&scripts::exists(selector)).await {
                Ok(value) if value.as_bool() == Some(true) => {
                    debug!("[{}] found element: {}", self.provider, selector);
                    return Some(selector.to_string());
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        "[{}] error checking selector {}: {}",
                        self.provider, selector, e
                    );
                }
            }
        }
        debug!(
            "[{}] no element found for primary: {}",
            self.provider, set.primary
        );
        None
    }

    /// Whether any candidate is present, in a single script
    pub async fn any_present(&self, set: &SelectorSet) -> Result<bool, ChannelError> {
        let candidates: Vec<&str> = set.candidates().collect();
        let value = self
            .channel
            .execute(&scripts::any_exists(&candidates))
            .await?;
        Ok(value.as_bool().unwrap_or(false))
    }
}
