//! Selector sets describing where each logical UI target lives on a page.

use serde::{Deserialize, Serialize};

/// Logical targets a page adapter needs to find on a provider's page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiTarget {
    /// Prompt editor
    Input,
    /// Send button
    Send,
    /// Assistant response blocks
    ResponseContainer,
    /// Shown while the provider is still generating
    TypingIndicator,
    /// Only present for an authenticated user
    LoginMarker,
}

impl UiTarget {
    pub const ALL: [UiTarget; 5] = [
        UiTarget::Input,
        UiTarget::Send,
        UiTarget::ResponseContainer,
        UiTarget::TypingIndicator,
        UiTarget::LoginMarker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UiTarget::Input => "input",
            UiTarget::Send => "send",
            UiTarget::ResponseContainer => "response_container",
            UiTarget::TypingIndicator => "typing_indicator",
            UiTarget::LoginMarker => "login_marker",
        }
    }
}

impl std::fmt::Display for UiTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A primary selector plus ordered fallbacks (Value Object)
///
/// Providers change their markup without notice, so every target is
/// described by several candidate CSS selectors. Resolution tries them in
/// [`candidates`](Self::candidates) order and takes the first that matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSet {
    pub primary: String,
    #[serde(default)]
    pub fallbacks: Vec<String>,
}

impl SelectorSet {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            fallbacks: Vec::new(),
        }
    }

    pub fn with_fallbacks<I, S>(mut self, fallbacks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallbacks = fallbacks.into_iter().map(Into::into).collect();
        self
    }

    /// Build a set from a static list, first entry is the primary.
    ///
    /// Returns `None` for an empty list.
    pub fn from_slice(selectors: &[&str]) -> Option<Self> {
        let (primary, rest) = selectors.split_first()?;
        Some(Self::new(*primary).with_fallbacks(rest.iter().copied()))
    }

    /// Primary first, then fallbacks in declaration order
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary.as_str()).chain(self.fallbacks.iter().map(String::as_str))
    }
}

/// One [`SelectorSet`] per [`UiTarget`] for a single provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSelectors {
    pub input: SelectorSet,
    pub send: SelectorSet,
    pub response_container: SelectorSet,
    pub typing_indicator: SelectorSet,
    pub login_marker: SelectorSet,
}

impl ProviderSelectors {
    pub fn get(&self, target: UiTarget) -> &SelectorSet {
        match target {
            UiTarget::Input => &self.input,
            UiTarget::Send => &self.send,
            UiTarget::ResponseContainer => &self.response_container,
            UiTarget::TypingIndicator => &self.typing_indicator,
            UiTarget::LoginMarker => &self.login_marker,
        }
    }
}
