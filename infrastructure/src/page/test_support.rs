//! In-memory page understanding the scripts built by [`super::scripts`].

use async_trait::async_trait;
use mad_application::{ChannelError, ScriptChannel};
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

#[derive(Default)]
struct PageState {
    elements: HashSet<String>,
    texts: HashMap<String, String>,
    input: String,
    /// Answers for `any_exists` probes, used before falling back to elements
    typing: VecDeque<bool>,
    scripts: Vec<String>,
    actions: Vec<String>,
}

#[derive(Default)]
pub(crate) struct FakePage {
    state: Mutex<PageState>,
    failing_probes: bool,
    failing_all: bool,
    input_ignored: bool,
}

fn literal_after(script: &str, marker: &str) -> Option<String> {
    let start = script.find(marker)? + marker.len();
    serde_json::Deserializer::from_str(&script[start..])
        .into_iter::<String>()
        .next()?
        .ok()
}

impl FakePage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_elements<I, S>(self, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state
            .lock()
            .unwrap()
            .elements
            .extend(elements.into_iter().map(Into::into));
        self
    }

    /// Put `text` in an element matched by `selector`
    pub(crate) fn with_text(self, selector: &str, text: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.elements.insert(selector.to_string());
            state.texts.insert(selector.to_string(), text.to_string());
        }
        self
    }

    /// Successive answers to typing-indicator probes
    pub(crate) fn with_typing<I: IntoIterator<Item = bool>>(self, answers: I) -> Self {
        self.state.lock().unwrap().typing.extend(answers);
        self
    }

    /// Existence probes fail with a script error
    pub(crate) fn failing_probes(mut self) -> Self {
        self.failing_probes = true;
        self
    }

    /// Every script fails
    pub(crate) fn failing_all(mut self) -> Self {
        self.failing_all = true;
        self
    }

    /// Input scripts report success but the editor stays empty
    pub(crate) fn ignoring_input(mut self) -> Self {
        self.input_ignored = true;
        self
    }

    pub(crate) fn remove_element(&self, selector: &str) {
        self.state.lock().unwrap().elements.remove(selector);
    }

    pub(crate) fn script_count(&self) -> usize {
        self.state.lock().unwrap().scripts.len()
    }

    pub(crate) fn input(&self) -> String {
        self.state.lock().unwrap().input.clone()
    }

    /// `click <selector>` / `enter <selector>` in the order they happened
    pub(crate) fn actions(&self) -> Vec<String> {
        self.state.lock().unwrap().actions.clone()
    }

    fn run(&self, script: &str) -> Result<Value, ChannelError> {
        let mut state = self.state.lock().unwrap();
        state.scripts.push(script.to_string());

        if let Some(selector) = script
            .strip_prefix("!!document.querySelector(")
            .and_then(|_| literal_after(script, "querySelector("))
        {
            if self.failing_probes {
                return Err(ChannelError::ScriptFailed("probe failed".into()));
            }
            return Ok(json!(state.elements.contains(&selector)));
        }

        if script.starts_with('[') && script.contains(".some(") {
            if let Some(answer) = state.typing.pop_front() {
                return Ok(json!(answer));
            }
            let end = script.find(".some(").unwrap_or(script.len());
            let candidates: Vec<String> = serde_json::from_str(&script[..end])
                .map_err(|e| ChannelError::ScriptFailed(e.to_string()))?;
            return Ok(json!(candidates.iter().any(|c| state.elements.contains(c))));
        }

        let selector = literal_after(script, "querySelectorAll(")
            .or_else(|| literal_after(script, "querySelector("))
            .unwrap_or_default();
        let present = state.elements.contains(&selector);

        if let Some(text) = literal_after(script, "const text = ") {
            if !present {
                return Ok(json!({"success": false, "error": "input not found"}));
            }
            if !self.input_ignored {
                state.input = text;
            }
            return Ok(json!({"success": true}));
        }

        if script.contains("button.click()") {
            if !present {
                return Ok(json!({"success": false, "error": "send control not found"}));
            }
            state.actions.push(format!("click {}", selector));
            return Ok(json!({"success": true}));
        }

        if script.contains("KeyboardEvent") {
            if !present {
                return Ok(json!({"success": false, "error": "input not found"}));
            }
            state.actions.push(format!("enter {}", selector));
            return Ok(json!({"success": true}));
        }

        if script.contains("trim().length > 0") {
            return Ok(json!(present && !state.input.trim().is_empty()));
        }

        if script.contains("querySelectorAll(") {
            let text = state.texts.get(&selector).cloned().unwrap_or_default();
            if script.ends_with(".length") {
                return Ok(json!(text.chars().count()));
            }
            return Ok(json!(text));
        }

        Err(ChannelError::ScriptFailed(format!(
            "unsupported script: {}",
            script
        )))
    }
}

#[async_trait]
impl ScriptChannel for FakePage {
    async fn execute(&self, script: &str) -> Result<Value, ChannelError> {
        if self.failing_all {
            self.state.lock().unwrap().scripts.push(script.to_string());
            return Err(ChannelError::PageUnavailable("page closed".into()));
        }
        self.run(script)
    }
}
