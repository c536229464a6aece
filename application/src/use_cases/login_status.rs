//! Login status query
//!
//! Reports whether the user is logged in to every known provider, so the
//! hosting side can prompt for a login before starting a debate.

use crate::ports::page_adapter::PageAdapterRegistry;
use futures::future::join_all;
use mad_domain::{LoginStatus, Provider};
use tracing::debug;

/// One [`LoginStatus`] per provider in [`Provider::ALL`] order.
///
/// Each provider lives on its own page, so the checks run in parallel.
/// A provider without an adapter counts as logged out.
pub async fn check_login_status(registry: &dyn PageAdapterRegistry) -> Vec<LoginStatus> {
    let checks = Provider::ALL.into_iter().map(|provider| {
        let adapter = registry.adapter(provider);
        async move {
            let is_logged_in = match adapter {
                Some(adapter) => adapter.is_logged_in().await,
                None => false,
            };
            debug!("[{}] logged in: {}", provider, is_logged_in);
            LoginStatus::new(provider, is_logged_in)
        }
    });
    join_all(checks).await
}
