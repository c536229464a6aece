//! Per-provider selector tables.
//!
//! The first entry of each list is the primary selector, the rest are
//! fallbacks tried in order.

use mad_domain::{Provider, ProviderSelectors, SelectorSet};

struct SelectorTable {
    input: &'static [&'static str],
    send: &'static [&'static str],
    response_container: &'static [&'static str],
    typing_indicator: &'static [&'static str],
    login_marker: &'static [&'static str],
}

const CHATGPT: SelectorTable = SelectorTable {
    input: &[
        "#prompt-textarea",
        "[contenteditable=\"true\"]",
        "textarea[data-id=\"root\"]",
    ],
    send: &[
        "[data-testid=\"send-button\"]",
        "button[aria-label=\"Send prompt\"]",
        "button[aria-label*=\"Send\"]",
        "form button:not([disabled])",
    ],
    response_container: &[
        "[data-message-author-role=\"assistant\"] .markdown",
        "[data-message-author-role=\"assistant\"]",
        ".agent-turn .markdown",
        "article[data-testid*=\"conversation\"] div.markdown",
    ],
    typing_indicator: &[
        ".result-streaming",
        "button[data-testid=\"stop-button\"]",
        "button[aria-label*=\"Stop\"]",
    ],
    login_marker: &[
        "[data-testid=\"profile-button\"]",
        "button[aria-label*=\"Account\"]",
        "img[alt*=\"User\"]",
        "#prompt-textarea",
    ],
};

const CLAUDE: SelectorTable = SelectorTable {
    input: &[
        "[contenteditable=\"true\"]",
        "div.ProseMirror",
        "fieldset[dir=\"auto\"] [contenteditable]",
    ],
    send: &[
        "[aria-label=\"Send message\"]",
        "button[aria-label*=\"Send\"]",
        "fieldset button[type=\"button\"]:last-of-type",
    ],
    response_container: &[
        "[data-is-streaming=\"false\"]",
        ".font-claude-message",
        "[data-testid=\"assistant-message\"]",
    ],
    typing_indicator: &[
        "[data-is-streaming=\"true\"]",
        "button[aria-label*=\"Stop\"]",
    ],
    login_marker: &[
        "[data-testid=\"user-menu\"]",
        "button[aria-label*=\"account\"]",
        "[data-testid=\"menu-trigger\"]",
        "fieldset[dir=\"auto\"]",
    ],
};

const GEMINI: SelectorTable = SelectorTable {
    input: &[".ql-editor", "rich-textarea [contenteditable=\"true\"]", "rich-textarea"],
    send: &[
        ".send-button",
        "button[aria-label*=\"Send\"]",
        "button.send-button-container",
    ],
    response_container: &[
        ".response-container",
        "model-response .markdown",
        "message-content",
    ],
    typing_indicator: &[
        ".loading-indicator",
        "button[aria-label*=\"Stop\"]",
        ".streaming",
    ],
    login_marker: &[
        "[data-user-email]",
        "img[data-iml]",
        "[aria-label*=\"Google Account\"]",
        "rich-textarea",
    ],
};

fn table(provider: Provider) -> &'static SelectorTable {
    match provider {
        Provider::ChatGpt => &CHATGPT,
        Provider::Claude => &CLAUDE,
        Provider::Gemini => &GEMINI,
    }
}

fn set(selectors: &'static [&'static str]) -> SelectorSet {
    // Tables are static and never empty; an empty one yields a selector that
    // matches nothing.
    SelectorSet::from_slice(selectors).unwrap_or_else(|| SelectorSet::new(":not(*)"))
}

/// Default selectors for `provider`
pub fn selectors_for(provider: Provider) -> ProviderSelectors {
    let table = table(provider);
    ProviderSelectors {
        input: set(table.input),
        send: set(table.send),
        response_container: set(table.response_container),
        typing_indicator: set(table.typing_indicator),
        login_marker: set(table.login_marker),
    }
}
