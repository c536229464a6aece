//! Per-provider browsing sessions.
//!
//! Each provider gets one persistent partition (`persist:<provider>`) so its
//! login survives page reloads and restarts of the hosting shell.

use chrono::{DateTime, Utc};
use mad_domain::Provider;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// A provider's persistent browsing context
///
/// The hosting shell keys cookies and storage by `partition`, so pages
/// reopened with the same partition keep their login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSession {
    pub provider: Provider,
    pub partition: String,
    pub created_at: DateTime<Utc>,
}

impl ProviderSession {
    fn new(provider: Provider) -> Self {
        Self {
            provider,
            partition: format!("persist:{}", provider.as_str()),
            created_at: Utc::now(),
        }
    }
}

/// One [`ProviderSession`] per provider, created on first use
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<Provider, Arc<ProviderSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The session for `provider`; repeated calls return the same instance
    pub fn session(&self, provider: Provider) -> Arc<ProviderSession> {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(sessions.entry(provider).or_insert_with(|| {
            debug!("[{}] creating session", provider);
            Arc::new(ProviderSession::new(provider))
        }))
    }

    /// Forget the cached session; the next call creates a fresh one
    pub fn clear(&self, provider: Provider) {
        let removed = self
            .sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&provider);
        if removed.is_some() {
            debug!("[{}] session cleared", provider);
        }
    }

    /// Partitions of every known session, sorted
    pub fn partitions(&self) -> Vec<String> {
        let mut partitions: Vec<String> = self
            .sessions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .map(|s| s.partition.clone())
            .collect();
        partitions.sort();
        partitions
    }
}
