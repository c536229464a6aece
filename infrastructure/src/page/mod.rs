//! Page automation
//!
//! Implements the [`PageAdapter`](mad_application::PageAdapter) port on top
//! of a [`ScriptChannel`](mad_application::ScriptChannel): selectors are
//! resolved with fallbacks, actions run as small scripts, and waits poll
//! the page with backoff.

pub mod adapter;
pub mod profiles;
pub mod resolver;
pub mod scripts;
pub mod selectors;
pub mod wait;

#[cfg(test)]
pub(crate) mod test_support;

pub use adapter::{AdapterTimings, ProviderProfile, ScriptedPageAdapter};
pub use profiles::{ChatGptProfile, ClaudeProfile, GeminiProfile};
pub use resolver::SelectorResolver;
pub use selectors::selectors_for;
pub use wait::{WaitOptions, wait_for_condition};
