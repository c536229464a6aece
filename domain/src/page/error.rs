//! Failure taxonomy for page adapter operations

use crate::core::provider::Provider;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Machine-readable failure category of a page operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdapterErrorCode {
    SelectorNotFound,
    InputFailed,
    SendFailed,
    ResponseTimeout,
    ExtractFailed,
    NotLoggedIn,
    VerificationFailed,
    Unknown,
}

impl AdapterErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdapterErrorCode::SelectorNotFound => "SELECTOR_NOT_FOUND",
            AdapterErrorCode::InputFailed => "INPUT_FAILED",
            AdapterErrorCode::SendFailed => "SEND_FAILED",
            AdapterErrorCode::ResponseTimeout => "RESPONSE_TIMEOUT",
            AdapterErrorCode::ExtractFailed => "EXTRACT_FAILED",
            AdapterErrorCode::NotLoggedIn => "NOT_LOGGED_IN",
            AdapterErrorCode::VerificationFailed => "VERIFICATION_FAILED",
            AdapterErrorCode::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for AdapterErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed page operation with its category and diagnostic details
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("[{code}] {message}")]
pub struct AdapterError {
    pub code: AdapterErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, Value>,
}

pub type AdapterResult<T> = Result<T, AdapterError>;

impl AdapterError {
    pub fn new(code: AdapterErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn not_logged_in(provider: Provider) -> Self {
        Self::new(
            AdapterErrorCode::NotLoggedIn,
            format!("Not logged in to {}", provider.display_name()),
        )
        .with_detail("provider", provider.as_str())
    }

    pub fn selector_not_found(what: &str, selector: &str) -> Self {
        Self::new(
            AdapterErrorCode::SelectorNotFound,
            format!("No element matched for {}", what),
        )
        .with_detail("selector", selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&AdapterErrorCode::ResponseTimeout).unwrap();
        assert_eq!(json, "\"RESPONSE_TIMEOUT\"");
        assert_eq!(AdapterErrorCode::SelectorNotFound.as_str(), "SELECTOR_NOT_FOUND");
    }

    #[test]
    fn test_display_includes_code() {
        let err = AdapterError::new(AdapterErrorCode::SendFailed, "Send button not clickable");
        assert_eq!(err.to_string(), "[SEND_FAILED] Send button not clickable");
    }

    #[test]
    fn test_details() {
        let err = AdapterError::selector_not_found("input", "#prompt-textarea")
            .with_detail("timeout_ms", 10_000u64);
        assert_eq!(err.code, AdapterErrorCode::SelectorNotFound);
        assert_eq!(err.details["selector"], "#prompt-textarea");
        assert_eq!(err.details["timeout_ms"], 10_000);
    }

    #[test]
    fn test_not_logged_in_names_provider() {
        let err = AdapterError::not_logged_in(Provider::Claude);
        assert_eq!(err.code, AdapterErrorCode::NotLoggedIn);
        assert_eq!(err.details["provider"], "claude");
    }
}
