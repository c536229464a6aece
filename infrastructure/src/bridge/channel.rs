use super::error::Result;
use super::shell::ShellBridge;
use crate::session::ProviderSession;
use async_trait::async_trait;
use mad_application::{ChannelError, ScriptChannel};
use mad_domain::Provider;
use serde_json::Value;
use std::sync::Arc;
use tracing::trace;

/// [`ScriptChannel`] for one provider's page behind the shell bridge
pub struct BridgeScriptChannel {
    bridge: Arc<ShellBridge>,
    session: Arc<ProviderSession>,
}

impl BridgeScriptChannel {
    pub fn new(bridge: Arc<ShellBridge>, session: Arc<ProviderSession>) -> Self {
        Self { bridge, session }
    }

    pub fn provider(&self) -> Provider {
        self.session.provider
    }

    /// Open the provider's chat page in its persistent partition
    pub async fn open(&self) -> Result<()> {
        let provider = self.session.provider;
        self.bridge
            .open(
                provider.as_str(),
                &self.session.partition,
                provider.base_url(),
            )
            .await
    }
}

#[async_trait]
impl ScriptChannel for BridgeScriptChannel {
    async fn execute(&self, script: &str) -> std::result::Result<Value, ChannelError> {
        trace!("[{}] executing script ({} bytes)", self.session.provider, script.len());
        self.bridge
            .execute(
                self.session.provider.as_str(),
                &self.session.partition,
                script,
            )
            .await
            .map_err(ChannelError::from)
    }
}
