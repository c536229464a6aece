//! Use cases (application services)
//!
//! Use cases orchestrate domain logic and coordinate with ports.

pub mod cycle_detector;
pub mod login_status;
pub mod run_debate;
pub(crate) mod shared;
pub mod status_poller;

#[cfg(test)]
pub(crate) mod test_support;
