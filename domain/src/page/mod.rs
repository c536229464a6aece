//! Page automation concepts.
//!
//! Everything a page adapter needs that is not I/O: where UI targets live
//! ([`selector`]), how operations fail ([`error`]) and what the status
//! poller observes ([`status`]).

pub mod error;
pub mod selector;
pub mod status;
