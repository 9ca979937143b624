//! Attribute-token extraction and routing.
//!
//! Attribute names are found lexically, independent of the linguistic
//! analysis: camelCase and snake_case identifiers are returned verbatim,
//! single- and double-quoted literals with their quotes stripped.

use iiq_rule_types::RuleType;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Alternatives are tried in order at each position; the leftmost match wins.
static ATTRIBUTE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r##"(?x)
            \b[a-z]+[A-Z][a-zA-Z0-9_]*\b        # camelCase
          | \b[a-z0-9]+(?:_[a-z0-9]+)+\b        # snake_case
          | '(?P<single>[a-zA-Z0-9_.]+)'        # single-quoted
          | "(?P<double>[a-zA-Z0-9_.]+)"        # double-quoted
        "##,
    )
    .expect("attribute pattern is a valid regex")
});

/// Attribute tokens in order of appearance, duplicates and casing preserved.
pub fn extract_attribute_tokens(text: &str) -> Vec<String> {
    ATTRIBUTE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            caps.name("single")
                .or_else(|| caps.name("double"))
                .or_else(|| caps.get(0))
                .map(|m| m.as_str().to_string())
        })
        .collect()
}

/// Attributes split into the source-side and identity-side lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRoute {
    pub source: Vec<String>,
    pub identity: Vec<String>,
}

/// Split extracted tokens between source and identity.
///
/// A BuildMap request with at least two tokens maps the first token onto the
/// second; anything after them is dropped. Every other request keeps all
/// tokens on the source side.
pub fn route_attributes(rule_type: Option<RuleType>, tokens: Vec<String>) -> AttributeRoute {
    if rule_type == Some(RuleType::BuildMap) && tokens.len() >= 2 {
        if tokens.len() > 2 {
            debug!(
                dropped = tokens.len() - 2,
                "BuildMap routing keeps only the first mapping pair"
            );
        }
        return AttributeRoute {
            source: vec![tokens[0].clone()],
            identity: vec![tokens[1].clone()],
        };
    }

    AttributeRoute {
        source: tokens,
        identity: Vec::new(),
    }
}
