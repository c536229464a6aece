//! Application layer for mad
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{CYCLE_WINDOW, DebateParams};
pub use ports::{
    conversation_logger::{
        ConversationEvent, ConversationEventKind, ConversationLogger, NoConversationLogger,
    },
    debate_event::DebateEvent,
    page_adapter::{PageAdapter, PageAdapterRegistry},
    progress_logger::{NoProgressLogger, ProgressLogger},
    repository::{DebateRepository, RepositoryError},
    script_channel::{ChannelError, ScriptChannel},
};
pub use use_cases::cycle_detector::CycleDetector;
pub use use_cases::login_status::check_login_status;
pub use use_cases::run_debate::{ControllerStatus, DebateController, RunDebateError};
pub use use_cases::status_poller::{DEFAULT_POLL_INTERVAL, StatusPoller};
