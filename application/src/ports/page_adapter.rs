//! Page adapter port
//!
//! Defines the operations the debate needs from one provider's chat page,
//! and how adapters are looked up by provider.

use async_trait::async_trait;
use mad_domain::{AdapterResult, Provider};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Drives one provider's chat UI
///
/// Operations are issued one at a time in the order the debate needs them:
/// `prepare_input → enter_prompt → submit_message → await_response →
/// get_response`.
#[async_trait]
pub trait PageAdapter: Send + Sync {
    fn provider(&self) -> Provider;

    /// `Ok` when the login marker is present, `NOT_LOGGED_IN` otherwise
    async fn check_login(&self) -> AdapterResult<()>;

    async fn is_logged_in(&self) -> bool {
        self.check_login().await.is_ok()
    }

    /// Wait until the prompt input exists
    async fn prepare_input(&self, timeout: Duration) -> AdapterResult<()>;

    async fn enter_prompt(&self, prompt: &str) -> AdapterResult<()>;

    async fn submit_message(&self) -> AdapterResult<()>;

    /// Wait for the provider to start and then finish answering
    async fn await_response(&self, timeout: Duration) -> AdapterResult<()>;

    /// Text of the latest response, `""` when there is none
    async fn get_response(&self) -> AdapterResult<String>;

    /// Whether the provider is generating right now. Never fails.
    async fn is_writing(&self) -> bool;

    /// Length of the latest response. Never fails.
    async fn response_length(&self) -> usize;
}

/// Looks up the adapter serving a provider
///
/// The hosting side owns adapter lifetimes; callers fetch per use.
pub trait PageAdapterRegistry: Send + Sync {
    fn adapter(&self, provider: Provider) -> Option<Arc<dyn PageAdapter>>;

    /// Providers with an adapter
    fn providers(&self) -> Vec<Provider>;
}

impl PageAdapterRegistry for HashMap<Provider, Arc<dyn PageAdapter>> {
    fn adapter(&self, provider: Provider) -> Option<Arc<dyn PageAdapter>> {
        self.get(&provider).cloned()
    }

    fn providers(&self) -> Vec<Provider> {
        let mut providers: Vec<Provider> = self.keys().copied().collect();
        providers.sort();
        providers
    }
}
