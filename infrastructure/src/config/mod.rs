//! Configuration file loading for mad
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `MAD_` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./mad.toml` or `./.mad.toml`
//! 4. Global: `<config_dir>/mad/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBridgeConfig, FileConfig, FileDebateConfig, FileLoggingConfig,
    FileOutputConfig, FilePollerConfig, FileTimeoutsConfig,
};
pub use loader::ConfigLoader;
