//! Provider value object representing one automated chat service

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Chat services that can take part in a debate (Value Object)
///
/// A provider carries no state of its own. It keys every per-provider
/// resource: the page adapter, the browsing session and the selector
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Provider {
    ChatGpt,
    Claude,
    Gemini,
}

impl Provider {
    /// Every supported provider, in display order
    pub const ALL: [Provider; 3] = [Provider::ChatGpt, Provider::Claude, Provider::Gemini];

    /// Get the string identifier for this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::ChatGpt => "chatgpt",
            Provider::Claude => "claude",
            Provider::Gemini => "gemini",
        }
    }

    /// Landing page of the provider's chat UI
    pub fn base_url(&self) -> &'static str {
        match self {
            Provider::ChatGpt => "https://chat.openai.com",
            Provider::Claude => "https://claude.ai",
            Provider::Gemini => "https://gemini.google.com",
        }
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::ChatGpt => "ChatGPT",
            Provider::Claude => "Claude",
            Provider::Gemini => "Gemini",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chatgpt" | "openai" => Ok(Provider::ChatGpt),
            "claude" | "anthropic" => Ok(Provider::Claude),
            "gemini" | "google" => Ok(Provider::Gemini),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}

impl Serialize for Provider {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Provider {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Union of `participants` and `judge`, de-duplicated, first occurrence wins.
pub fn unique_providers<'a>(providers: impl IntoIterator<Item = &'a Provider>) -> Vec<Provider> {
    let mut seen = Vec::new();
    for provider in providers {
        if !seen.contains(provider) {
            seen.push(*provider);
        }
    }
    seen
}
