//! Structured data extraction from free-form chat responses.
//!
//! Participants and the judge are asked to answer with JSON, but web chat
//! UIs wrap it in prose or markdown fences. These functions are pure domain
//! logic: locate the JSON object, read the fields we need, and fall back to
//! an empty or negative answer when nothing usable is there.
//!
//! | Function | Expected shape |
//! |----------|----------------|
//! | [`parse_element_scores`] | `{"elements":[{"name","score","critique"}]}` |
//! | [`parse_element_names`] | `{"elements":[{"name"}]}` or `{"elements":["name"]}` |
//! | [`parse_cycle_verdict`] | `{"isCycle": bool, "reason": str}` |

use serde_json::Value;

/// One element's score as reported by a participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedElementScore {
    pub name: String,
    /// Clamped to 0..=100
    pub score: u8,
    pub critique: String,
    /// Revised text of the element, if the participant provided one
    pub content: Option<String>,
}

impl ParsedElementScore {
    /// Text stored as the element's version: the revision, else the critique
    pub fn version_content(&self) -> &str {
        self.content.as_deref().unwrap_or(&self.critique)
    }
}

/// Judge's verdict on whether recent versions go in circles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleVerdict {
    pub is_cycle: bool,
    pub reason: String,
}

impl CycleVerdict {
    pub fn cycle(reason: impl Into<String>) -> Self {
        Self {
            is_cycle: true,
            reason: reason.into(),
        }
    }

    pub fn no_cycle(reason: impl Into<String>) -> Self {
        Self {
            is_cycle: false,
            reason: reason.into(),
        }
    }
}

/// Find the first JSON object in a response.
///
/// Tries, in order: the whole text, each fenced code block, and the span
/// between the first `{` and the last `}`.
pub fn extract_json_object(response: &str) -> Option<Value> {
    let trimmed = response.trim();
    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    let mut rest = trimmed;
    while let Some(open) = rest.find("```") {
        let after = &rest[open + 3..];
        let body_start = after.find('\n').map(|i| i + 1).unwrap_or(0);
        let Some(close) = after[body_start..].find("```") else {
            break;
        };
        let body = after[body_start..body_start + close].trim();
        if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(body) {
            return Some(value);
        }
        rest = &after[body_start + close + 3..];
    }

    if let Some(start) = trimmed.find('{')
        && let Some(end) = trimmed.rfind('}')
        && end > start
        && let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(&trimmed[start..=end])
    {
        return Some(value);
    }

    None
}

/// Parse per-element scores from a participant response.
///
/// Entries without a name or a numeric score are skipped. Scores may be
/// numbers or numeric strings and are rounded and clamped to 0..=100.
pub fn parse_element_scores(response: &str) -> Vec<ParsedElementScore> {
    let Some(json) = extract_json_object(response) else {
        return Vec::new();
    };
    let Some(elements) = json.get("elements").and_then(Value::as_array) else {
        return Vec::new();
    };

    elements
        .iter()
        .filter_map(|entry| {
            let name = entry.get("name")?.as_str()?.trim();
            if name.is_empty() {
                return None;
            }
            let score = parse_score(entry.get("score")?)?;
            let critique = entry
                .get("critique")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let content = entry
                .get("content")
                .and_then(Value::as_str)
                .map(str::to_string);
            Some(ParsedElementScore {
                name: name.to_string(),
                score,
                critique,
                content,
            })
        })
        .collect()
}

fn parse_score(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok()?,
        _ => return None,
    };
    if !raw.is_finite() {
        return None;
    }
    Some(raw.round().clamp(0.0, 100.0) as u8)
}

/// Parse the judge's element breakdown into unique, non-empty names.
pub fn parse_element_names(response: &str) -> Vec<String> {
    let Some(json) = extract_json_object(response) else {
        return Vec::new();
    };
    let Some(elements) = json.get("elements").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut names: Vec<String> = Vec::new();
    for entry in elements {
        let name = match entry {
            Value::String(s) => s.as_str(),
            Value::Object(_) => match entry.get("name").and_then(Value::as_str) {
                Some(n) => n,
                None => continue,
            },
            _ => continue,
        };
        let name = name.trim();
        if !name.is_empty() && !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            names.push(name.to_string());
        }
    }
    names
}

/// Parse a cycle verdict, accepting `isCycle` or `is_cycle`.
///
/// Returns `None` when no verdict can be read.
pub fn parse_cycle_verdict(response: &str) -> Option<CycleVerdict> {
    let json = extract_json_object(response)?;
    let is_cycle = json
        .get("isCycle")
        .or_else(|| json.get("is_cycle"))?
        .as_bool()?;
    let reason = json
        .get("reason")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Some(CycleVerdict { is_cycle, reason })
}
