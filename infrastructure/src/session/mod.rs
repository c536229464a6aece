//! Persistent browsing sessions per provider.

mod store;

pub use store::{ProviderSession, SessionStore};
