//! Live progress while a debate runs

pub mod logger;
pub mod reporter;
