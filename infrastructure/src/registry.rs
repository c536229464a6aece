//! Page adapter registry
//!
//! Builds one [`ScriptedPageAdapter`] per provider on top of the shell
//! bridge, each bound to the provider's persistent session.

use crate::bridge::{BridgeError, BridgeScriptChannel, ShellBridge};
use crate::page::{AdapterTimings, ChatGptProfile, ClaudeProfile, GeminiProfile, ScriptedPageAdapter};
use crate::session::SessionStore;
use mad_application::{PageAdapter, PageAdapterRegistry, ScriptChannel};
use mad_domain::Provider;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Build the adapter for `provider` over `channel`
pub fn adapter_for(
    provider: Provider,
    channel: Arc<dyn ScriptChannel>,
    timings: AdapterTimings,
) -> Arc<dyn PageAdapter> {
    match provider {
        Provider::ChatGpt => {
            Arc::new(ScriptedPageAdapter::new(ChatGptProfile, channel).with_timings(timings))
        }
        Provider::Claude => {
            Arc::new(ScriptedPageAdapter::new(ClaudeProfile, channel).with_timings(timings))
        }
        Provider::Gemini => {
            Arc::new(ScriptedPageAdapter::new(GeminiProfile, channel).with_timings(timings))
        }
    }
}

#[derive(Default)]
pub struct ProviderRegistry {
    adapters: HashMap<Provider, Arc<dyn PageAdapter>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `adapter`, replacing any adapter for the same provider
    pub fn insert(&mut self, adapter: Arc<dyn PageAdapter>) {
        self.adapters.insert(adapter.provider(), adapter);
    }

    /// Open each provider's page through the bridge and register its adapter
    pub async fn connect(
        bridge: Arc<ShellBridge>,
        sessions: &SessionStore,
        providers: &[Provider],
        timings: AdapterTimings,
    ) -> Result<Self, BridgeError> {
        let mut registry = Self::new();
        for &provider in providers {
            let channel = BridgeScriptChannel::new(Arc::clone(&bridge), sessions.session(provider));
            channel.open().await?;
            info!("[{}] page ready", provider);
            registry.insert(adapter_for(provider, Arc::new(channel), timings.clone()));
        }
        Ok(registry)
    }
}

impl PageAdapterRegistry for ProviderRegistry {
    fn adapter(&self, provider: Provider) -> Option<Arc<dyn PageAdapter>> {
        self.adapters.get(&provider).cloned()
    }

    fn providers(&self) -> Vec<Provider> {
        let mut providers: Vec<Provider> = self.adapters.keys().copied().collect();
        providers.sort();
        providers
    }
}
