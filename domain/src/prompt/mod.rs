//! Prompt domain
//!
//! Prompts sent to the judge and the participants during a debate.

mod template;

pub use template::PromptTemplate;
