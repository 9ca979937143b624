//! Rule-type classification

use iiq_rule_types::RuleType;

use super::keywords::{first_match, KeywordRule};

/// Checked in order: Correlation, BuildMap, PreIterate.
pub const RULE_TYPE_RULES: &[KeywordRule<RuleType>] = &[
    KeywordRule {
        result: RuleType::Correlation,
        keywords: &["correlation"],
    },
    KeywordRule {
        result: RuleType::BuildMap,
        keywords: &["build map", "buildmap"],
    },
    KeywordRule {
        result: RuleType::PreIterate,
        keywords: &["pre-iterate", "preiterate"],
    },
];

pub fn classify_rule_type(text: &str) -> Option<RuleType> {
    first_match(RULE_TYPE_RULES, text)
}
