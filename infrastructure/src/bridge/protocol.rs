//! JSON-RPC protocol types for the shell bridge.
//!
//! # Protocol Overview
//!
//! - **Requests**: core → shell (`page.execute`, `page.open`)
//! - **Responses**: shell → core (result or error)
//! - **Notifications**: shell → core (`bridge.log`, `page.closed`)

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

pub const METHOD_EXECUTE: &str = "page.execute";
pub const METHOD_OPEN: &str = "page.open";
pub const NOTIFY_LOG: &str = "bridge.log";
pub const NOTIFY_PAGE_CLOSED: &str = "page.closed";

/// Error code the shell uses when the provider's page does not exist
pub const PAGE_UNAVAILABLE: i64 = -32001;

/// Global request ID counter for JSON-RPC requests.
static REQUEST_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    REQUEST_ID.fetch_add(1, Ordering::SeqCst)
}

/// JSON-RPC request
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    /// Creates a new JSON-RPC request with an auto-generated ID.
    pub fn new(method: impl Into<String>, params: Option<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0",
            id: next_id(),
            method: method.into(),
            params,
        }
    }
}

/// JSON-RPC response
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub jsonrpc: String,
    pub id: Option<u64>,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// JSON-RPC notification (no `id`)
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcNotification {
    pub method: String,
    pub params: Option<serde_json::Value>,
}

/// Parameters of `page.execute`
#[derive(Debug, Clone, Serialize)]
pub struct ExecuteParams<'a> {
    pub provider: &'a str,
    pub partition: &'a str,
    pub script: &'a str,
}

/// Parameters of `page.open`
#[derive(Debug, Clone, Serialize)]
pub struct OpenParams<'a> {
    pub provider: &'a str,
    pub partition: &'a str,
    pub url: &'a str,
}

/// Params of a `bridge.log` notification
#[derive(Debug, Clone, Deserialize)]
pub struct LogParams {
    #[serde(default)]
    pub level: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_increase() {
        let a = JsonRpcRequest::new(METHOD_EXECUTE, None);
        let b = JsonRpcRequest::new(METHOD_EXECUTE, None);
        assert!(b.id > a.id);
    }

    #[test]
    fn test_request_without_params_omits_field() {
        let json = serde_json::to_value(JsonRpcRequest::new(METHOD_OPEN, None)).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["method"], "page.open");
        assert!(json.get("params").is_none());
    }

    #[test]
    fn test_error_response() {
        let response: JsonRpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":7,"error":{"code":-32001,"message":"no page"}}"#,
        )
        .unwrap();
        assert_eq!(response.id, Some(7));
        assert!(response.result.is_none());
        let error = response.error.unwrap();
        assert_eq!(error.code, PAGE_UNAVAILABLE);
        assert!(error.data.is_none());
    }
}
