//! Script channel port
//!
//! Defines how the core runs scripts inside a provider's page. The hosting
//! shell owns the browsing contexts; the core only sees this channel.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while executing a page script
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("Script failed: {0}")]
    ScriptFailed(String),

    #[error("Page not available: {0}")]
    PageUnavailable(String),

    #[error("Timeout")]
    Timeout,

    #[error("Transport closed")]
    TransportClosed,

    #[error("Other error: {0}")]
    Other(String),
}

/// Executes scripts in one provider's page
///
/// Implementations (adapters) live in the infrastructure layer. Callers never
/// issue two scripts against the same channel concurrently.
#[async_trait]
pub trait ScriptChannel: Send + Sync {
    /// Evaluate `script` in the page and return its JSON-serialisable result
    async fn execute(&self, script: &str) -> Result<Value, ChannelError>;
}
