//! Domain layer for mad
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Debate
//!
//! A debate refines a topic across several chat providers in rounds:
//!
//! - **Elements**: the judge breaks the topic into named elements
//! - **Turns**: each participant scores and revises every open element
//! - **Completion**: an element closes when its score crosses the threshold,
//!   or when the judge sees its last three versions going in circles
//!
//! ## Page automation
//!
//! Providers are driven through their web UI. [`SelectorSet`]s describe where
//! each UI target lives, with fallbacks for markup changes, and
//! [`AdapterError`] classifies what can go wrong on a page.

pub mod config;
pub mod core;
pub mod debate;
pub mod page;
pub mod prompt;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::{
    error::DomainError,
    provider::{Provider, unique_providers},
    string::preview,
};
pub use debate::{
    config::{DEFAULT_COMPLETION_THRESHOLD, DebateConfig},
    entities::{DebateElement, DebateSession, ElementVersion},
    parsing::{
        CycleVerdict, ParsedElementScore, extract_json_object, parse_cycle_verdict,
        parse_element_names, parse_element_scores,
    },
    preset::Preset,
    progress::{DebateProgress, DebateResult, ElementScoreUpdate, ProgressPhase},
    value_objects::{CompletionReason, ElementId, ElementStatus, SessionId, SessionStatus},
};
pub use page::{
    error::{AdapterError, AdapterErrorCode, AdapterResult},
    selector::{ProviderSelectors, SelectorSet, UiTarget},
    status::{LlmStatus, LoginStatus},
};
pub use prompt::PromptTemplate;
