//! Shell bridge
//!
//! JSON-RPC over the stdio of the hosting shell's bridge process. The shell
//! owns the provider pages; the core reaches them through
//! [`BridgeScriptChannel`], one per provider.

pub mod channel;
pub mod error;
pub mod protocol;
pub mod shell;
pub mod transport;

pub use channel::BridgeScriptChannel;
pub use error::BridgeError;
pub use shell::{DEFAULT_REQUEST_TIMEOUT, ShellBridge};
