//! Debate presets and the element lists they fall back to

use serde::{Deserialize, Serialize};

/// Kind of debate, which frames the judge's breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    CodeReview,
    QaAccuracy,
    Decision,
    #[default]
    General,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::CodeReview,
        Preset::QaAccuracy,
        Preset::Decision,
        Preset::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::CodeReview => "code_review",
            Preset::QaAccuracy => "qa_accuracy",
            Preset::Decision => "decision",
            Preset::General => "general",
        }
    }

    /// One-line framing given to the judge
    pub fn description(&self) -> &'static str {
        match self {
            Preset::CodeReview => "a code review of the material below",
            Preset::QaAccuracy => "an accuracy check of the answer below",
            Preset::Decision => "a decision between the options below",
            Preset::General => "an open critique of the topic below",
        }
    }

    /// Elements debated when the judge does not produce a breakdown
    pub fn default_elements(&self) -> &'static [&'static str] {
        match self {
            Preset::CodeReview => &[
                "Correctness",
                "Security",
                "Performance",
                "Readability",
                "Maintainability",
            ],
            Preset::QaAccuracy => &["Factual accuracy", "Completeness", "Clarity", "Sources"],
            Preset::Decision => &["Benefits", "Risks", "Cost", "Feasibility"],
            Preset::General => &["Accuracy", "Completeness", "Clarity"],
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "code_review" | "review" => Ok(Preset::CodeReview),
            "qa_accuracy" | "qa" => Ok(Preset::QaAccuracy),
            "decision" => Ok(Preset::Decision),
            "general" => Ok(Preset::General),
            other => Err(format!(
                "Unknown preset '{}'. Valid values: code_review, qa_accuracy, decision, general",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_presets() {
        assert_eq!("code-review".parse::<Preset>().unwrap(), Preset::CodeReview);
        assert_eq!("QA".parse::<Preset>().unwrap(), Preset::QaAccuracy);
        assert!("poetry".parse::<Preset>().is_err());
    }

    #[test]
    fn test_every_preset_has_elements() {
        for preset in Preset::ALL {
            assert!(!preset.default_elements().is_empty(), "{preset}");
        }
    }

    #[test]
    fn test_code_review_includes_security() {
        assert!(Preset::CodeReview.default_elements().contains(&"Security"));
    }
}
