//! Core domain concepts shared across all subdomains.
//!
//! - [`provider::Provider`]: the automated chat services (ChatGPT, Claude, Gemini)
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod provider;
pub mod string;
