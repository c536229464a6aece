//! Infrastructure layer for mad
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the shell bridge that executes scripts inside
//! provider pages, the page adapters built on it, session and debate
//! storage, transcript logging and configuration file loading.

pub mod bridge;
pub mod config;
pub mod logging;
pub mod page;
pub mod registry;
pub mod repository;
pub mod session;

// Re-export commonly used types
pub use bridge::{BridgeError, BridgeScriptChannel, DEFAULT_REQUEST_TIMEOUT, ShellBridge};
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use logging::JsonlConversationLogger;
pub use page::{AdapterTimings, ScriptedPageAdapter, selectors_for};
pub use registry::{ProviderRegistry, adapter_for};
pub use repository::InMemoryDebateRepository;
pub use session::{ProviderSession, SessionStore};
