//! Point-in-time observations of a provider page

use crate::core::provider::Provider;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether the user is logged in to a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginStatus {
    pub provider: Provider,
    pub is_logged_in: bool,
    pub last_checked: DateTime<Utc>,
}

impl LoginStatus {
    pub fn new(provider: Provider, is_logged_in: bool) -> Self {
        Self {
            provider,
            is_logged_in,
            last_checked: Utc::now(),
        }
    }
}

/// Generation activity sampled by the status poller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmStatus {
    pub provider: Provider,
    pub is_writing: bool,
    /// Length of the latest response, used as a rough token count
    pub token_count: usize,
    pub timestamp: DateTime<Utc>,
}

impl LlmStatus {
    pub fn new(provider: Provider, is_writing: bool, token_count: usize) -> Self {
        Self {
            provider,
            is_writing,
            token_count,
            timestamp: Utc::now(),
        }
    }
}
