//! Script builders for page automation.
//!
//! Every value spliced into a script goes through [`js_string`], so selectors
//! and prompts containing quotes or newlines never break the script.

use serde::Deserialize;
use serde_json::Value;

/// Encode `value` as a JavaScript string literal
pub fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn js_array(values: &[&str]) -> String {
    serde_json::Value::from(values.to_vec()).to_string()
}

/// Result shape returned by action scripts: `{ success, error? }`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScriptOutcome {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl ScriptOutcome {
    /// Read an action result; anything that is not the expected object is
    /// a failure
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|_| Self {
            success: false,
            error: Some("unexpected script result".to_string()),
        })
    }

    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("script reported failure")
    }
}

/// `true` when `selector` matches an element
pub fn exists(selector: &str) -> String {
    format!("!!document.querySelector({})", js_string(selector))
}

/// `true` when any of `selectors` matches an element
pub fn any_exists(selectors: &[&str]) -> String {
    format!(
        "{}.some((s) => !!document.querySelector(s))",
        js_array(selectors)
    )
}

pub fn click(selector: &str) -> String {
    format!(
        r#"(() => {{
  const el = document.querySelector({sel});
  if (!el) return {{ success: false, error: 'send control not found' }};
  const button = el.tagName === 'BUTTON' ? el : (el.closest('button') || el);
  if (button.disabled) return {{ success: false, error: 'send control disabled' }};
  button.click();
  return {{ success: true }};
}})()"#,
        sel = js_string(selector)
    )
}

/// Dispatch an Enter keydown on the element matched by `selector`
pub fn press_enter(selector: &str) -> String {
    format!(
        r#"(() => {{
  const input = document.querySelector({sel});
  if (!input) return {{ success: false, error: 'input not found' }};
  input.dispatchEvent(new KeyboardEvent('keydown', {{
    key: 'Enter', code: 'Enter', keyCode: 13, which: 13, bubbles: true, cancelable: true
  }}));
  return {{ success: true }};
}})()"#,
        sel = js_string(selector)
    )
}

/// Text of the last element matched by `selector`, `''` when none
pub fn last_text(selector: &str) -> String {
    format!(
        r#"(() => {{
  const nodes = document.querySelectorAll({sel});
  const last = nodes[nodes.length - 1];
  return ((last && (last.innerText || last.textContent)) || '').trim();
}})()"#,
        sel = js_string(selector)
    )
}

pub fn last_text_length(selector: &str) -> String {
    format!("{}.length", last_text(selector))
}

/// `true` when the editor matched by `selector` holds any text
pub fn has_text(selector: &str) -> String {
    format!(
        r#"(() => {{
  const el = document.querySelector({sel});
  const content = (el && (el.innerText || el.value)) || '';
  return content.trim().length > 0;
}})()"#,
        sel = js_string(selector)
    )
}

/// Write `text` into a plain textarea or a contenteditable region
pub fn set_text(selector: &str, text: &str) -> String {
    format!(
        r#"(() => {{
  try {{
    const el = document.querySelector({sel});
    if (!el) return {{ success: false, error: 'input not found' }};
    const text = {text};
    if (el.tagName === 'TEXTAREA' || el.tagName === 'INPUT') {{
      el.value = text;
      el.dispatchEvent(new Event('input', {{ bubbles: true }}));
    }} else {{
      el.innerHTML = '';
      el.innerText = text;
      el.dispatchEvent(new InputEvent('input', {{ bubbles: true }}));
    }}
    return {{ success: true }};
  }} catch (e) {{
    return {{ success: false, error: String(e && e.message || e) }};
  }}
}})()"#,
        sel = js_string(selector),
        text = js_string(text)
    )
}
