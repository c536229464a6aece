//! Debate domain
//!
//! A debate breaks a topic into named elements, lets participants score and
//! revise them turn by turn, and closes each element once its score crosses
//! the threshold or its recent versions start repeating.

pub mod config;
pub mod entities;
pub mod parsing;
pub mod preset;
pub mod progress;
pub mod value_objects;
