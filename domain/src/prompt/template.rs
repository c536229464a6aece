//! Prompt templates for the debate flow

use crate::debate::config::DebateConfig;
use crate::debate::entities::{DebateElement, ElementVersion};

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Ask the judge to split the topic into elements worth debating
    pub fn breakdown(config: &DebateConfig) -> String {
        let mut prompt = format!(
            r#"You are the judge of a structured debate. The debate is {}.

Topic:
{}
"#,
            config.preset.description(),
            config.topic.trim()
        );

        if let Some(context) = config.context.as_deref().filter(|c| !c.trim().is_empty()) {
            prompt.push_str(&format!("\nContext:\n{}\n", context.trim()));
        }

        let examples = config.preset.default_elements().join(", ");
        prompt.push_str(&format!(
            r#"
Break the topic into 3 to 6 independent elements that can each be scored from 0 to 100.
Typical elements for this kind of debate: {}.

Respond with JSON only, in exactly this shape:
{{"elements": [{{"name": "Element name"}}]}}"#,
            examples
        ));

        prompt
    }

    /// Prompt for one participant turn over the elements still open
    pub fn participant_turn(
        config: &DebateConfig,
        elements: &[DebateElement],
        iteration: u32,
    ) -> String {
        let mut prompt = format!(
            r#"You are participating in round {} of a structured debate.

Topic:
{}
"#,
            iteration,
            config.topic.trim()
        );

        if let Some(context) = config.context.as_deref().filter(|c| !c.trim().is_empty()) {
            prompt.push_str(&format!("\nContext:\n{}\n", context.trim()));
        }

        prompt.push_str("\nElements still under debate:\n");
        for element in elements {
            match element.version_history.last() {
                Some(last) => prompt.push_str(&format!(
                    "\n--- {} (current score {}) ---\n{}\n",
                    element.name, element.current_score, last.content
                )),
                None => prompt.push_str(&format!("\n--- {} (not yet scored) ---\n", element.name)),
            }
        }

        prompt.push_str(&format!(
            r#"
For each element: critique the current state, propose an improved version, and give a score from 0 to 100.
A score of {} or more means the element needs no further work.

Respond with JSON only, in exactly this shape:
{{"elements": [{{"name": "Element name", "score": 85, "critique": "What is still wrong", "content": "Improved version"}}]}}"#,
            config.completion_threshold
        ));

        prompt
    }

    /// Ask the judge whether the recent versions of an element go in circles
    pub fn cycle_check(element_name: &str, versions: &[ElementVersion]) -> String {
        let mut prompt = format!(
            r#"You are the judge of a structured debate. Below are the most recent versions of the element "{}".

"#,
            element_name
        );

        for version in versions {
            prompt.push_str(&format!(
                "--- Iteration {} ({}, score {}) ---\n{}\n\n",
                version.iteration, version.provider, version.score, version.content
            ));
        }

        prompt.push_str(
            r#"Decide whether these versions are going in circles: repeating, or alternating between the same positions without real progress.

Respond with JSON only, in exactly this shape:
{"isCycle": true, "reason": "Short explanation"}"#,
        );

        prompt
    }
}
