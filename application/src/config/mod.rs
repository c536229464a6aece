//! Application-level configuration.
//!
//! - [`DebateParams`]: debate loop control (timeouts, iteration cap)

pub mod debate_params;

pub use debate_params::{CYCLE_WINDOW, DebateParams};
