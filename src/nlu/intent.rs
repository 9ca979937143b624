//! Intent classification
//!
//! Decides whether the user wants a rule generated, modified or explained.

use serde::{Deserialize, Serialize};

use super::keywords::{first_match, KeywordRule};

/// The user's high-level goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    GenerateRule,
    ModifyRule,
    ExplainRule,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GenerateRule => "GenerateRule",
            Self::ModifyRule => "ModifyRule",
            Self::ExplainRule => "ExplainRule",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Generate verbs are checked before modify verbs, then explain phrases.
pub const INTENT_RULES: &[KeywordRule<Intent>] = &[
    KeywordRule {
        result: Intent::GenerateRule,
        keywords: &["create", "generate", "make", "build"],
    },
    KeywordRule {
        result: Intent::ModifyRule,
        keywords: &["change", "modify", "update", "amend"],
    },
    KeywordRule {
        result: Intent::ExplainRule,
        keywords: &["explain", "describe", "what is"],
    },
];

pub fn classify_intent(text: &str) -> Option<Intent> {
    first_match(INTENT_RULES, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_verbs() {
        for text in [
            "Create a rule",
            "please GENERATE one",
            "make it so",
            "build a map",
        ] {
            assert_eq!(classify_intent(text), Some(Intent::GenerateRule), "{}", text);
        }
    }

    #[test]
    fn test_modify_verbs() {
        assert_eq!(
            classify_intent("Update the correlation rule"),
            Some(Intent::ModifyRule)
        );
        assert_eq!(classify_intent("amend it"), Some(Intent::ModifyRule));
    }

    #[test]
    fn test_explain_phrases() {
        assert_eq!(
            classify_intent("What is a pre-iterate rule?"),
            Some(Intent::ExplainRule)
        );
        assert_eq!(classify_intent("describe this"), Some(Intent::ExplainRule));
    }

    #[test]
    fn test_generate_outranks_modify_and_explain() {
        assert_eq!(
            classify_intent("Explain how to change and then create a rule"),
            Some(Intent::GenerateRule)
        );
        assert_eq!(
            classify_intent("explain then modify"),
            Some(Intent::ModifyRule)
        );
    }

    #[test]
    fn test_embedded_substring_matches() {
        // "rebuild" contains "build"
        assert_eq!(
            classify_intent("rebuild the index"),
            Some(Intent::GenerateRule)
        );
    }

    #[test]
    fn test_unknown_intent() {
        assert_eq!(classify_intent(""), None);
        assert_eq!(classify_intent("hello there"), None);
        assert_eq!(classify_intent("what's up"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Intent::ExplainRule.to_string(), "ExplainRule");
        assert_eq!(
            serde_json::to_string(&Intent::GenerateRule).unwrap(),
            "\"GenerateRule\""
        );
    }
}
