//! Port definitions (interfaces for external adapters)
//!
//! Ports define the boundaries between the application layer and
//! infrastructure or presentation layers.

pub mod conversation_logger;
pub mod debate_event;
pub mod page_adapter;
pub mod progress_logger;
pub mod repository;
pub mod script_channel;
