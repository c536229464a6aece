//! Error types for the shell bridge

use super::protocol::PAGE_UNAVAILABLE;
use mad_application::ChannelError;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur when talking to the hosting shell
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("JSON-RPC error (code {code}): {message}")]
    RpcError { code: i64, message: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Transport closed")]
    TransportClosed,

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl From<BridgeError> for ChannelError {
    fn from(error: BridgeError) -> Self {
        match error {
            BridgeError::RpcError { code, message } if code == PAGE_UNAVAILABLE => {
                ChannelError::PageUnavailable(message)
            }
            BridgeError::RpcError { message, .. } => ChannelError::ScriptFailed(message),
            BridgeError::Timeout(_) => ChannelError::Timeout,
            BridgeError::TransportClosed | BridgeError::Io(_) => {
                ChannelError::TransportClosed
            }
            other => ChannelError::Other(other.to_string()),
        }
    }
}
