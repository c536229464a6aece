//! Provider profiles.

use super::adapter::ProviderProfile;
use super::scripts::js_string;
use mad_domain::Provider;

/// chatgpt.com
///
/// The editor is a React-controlled ProseMirror region (older layouts use a
/// plain textarea), so input goes through a paragraph node or the native
/// value setter and is verified afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatGptProfile;

impl ProviderProfile for ChatGptProfile {
    fn provider(&self) -> Provider {
        Provider::ChatGpt
    }

    fn input_script(&self, selector: &str, prompt: &str) -> String {
        format!(
            r#"(() => {{
  try {{
    const el = document.querySelector({sel});
    if (!el) return {{ success: false, error: 'input not found' }};
    const text = {text};
    el.focus();
    if (el.isContentEditable) {{
      el.innerHTML = '';
      const p = document.createElement('p');
      p.textContent = text;
      el.appendChild(p);
      ['input', 'change'].forEach((type) => el.dispatchEvent(new Event(type, {{ bubbles: true }})));
      el.dispatchEvent(new InputEvent('input', {{ bubbles: true, cancelable: true, inputType: 'insertText', data: text }}));
      return {{ success: true }};
    }}
    if (el.tagName === 'TEXTAREA') {{
      const setter = Object.getOwnPropertyDescriptor(window.HTMLTextAreaElement.prototype, 'value');
      if (setter && setter.set) {{ setter.set.call(el, text); }} else {{ el.value = text; }}
      el.dispatchEvent(new Event('input', {{ bubbles: true }}));
      return {{ success: true }};
    }}
    return {{ success: false, error: 'unknown input type' }};
  }} catch (e) {{
    return {{ success: false, error: String(e && e.message || e) }};
  }}
}})()"#,
            sel = js_string(selector),
            text = js_string(prompt)
        )
    }

    fn verifies_input(&self) -> bool {
        true
    }
}

/// claude.ai, a contenteditable editor that accepts `innerText`
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaudeProfile;

impl ProviderProfile for ClaudeProfile {
    fn provider(&self) -> Provider {
        Provider::Claude
    }
}

/// gemini.google.com
///
/// The Quill editor keeps one `<p>` per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiProfile;

impl ProviderProfile for GeminiProfile {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    fn input_script(&self, selector: &str, prompt: &str) -> String {
        format!(
            r#"(() => {{
  try {{
    const el = document.querySelector({sel});
    if (!el) return {{ success: false, error: 'editor not found' }};
    const text = {text};
    el.innerHTML = '';
    text.split('\n').forEach((line) => {{
      const p = document.createElement('p');
      p.textContent = line;
      el.appendChild(p);
    }});
    el.dispatchEvent(new Event('input', {{ bubbles: true }}));
    return {{ success: true }};
  }} catch (e) {{
    return {{ success: false, error: String(e && e.message || e) }};
  }}
}})()"#,
            sel = js_string(selector),
            text = js_string(prompt)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::adapter::ScriptedPageAdapter;
    use crate::page::test_support::FakePage;
    use mad_application::PageAdapter;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_gemini_input() {
        let page = Arc::new(FakePage::new().with_elements([".ql-editor"]));
        let adapter = ScriptedPageAdapter::new(GeminiProfile, page.clone());
        adapter.enter_prompt("line one\nline two").await.unwrap();
        assert_eq!(page.input(), "line one\nline two");
    }

    #[test]
    fn test_only_chatgpt_verifies() {
        assert!(ChatGptProfile.verifies_input());
        assert!(!ClaudeProfile.verifies_input());
        assert!(!GeminiProfile.verifies_input());
    }

    #[test]
    fn test_profiles_use_their_provider_selectors() {
        assert_eq!(GeminiProfile.selectors().send.primary, ".send-button");
        assert_eq!(ClaudeProfile.provider(), Provider::Claude);
    }
}
