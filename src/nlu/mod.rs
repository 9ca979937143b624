//! Rule-request extraction pipeline.
//!
//! A single deterministic pass over one instruction:
//!
//! ```text
//! text ─┬─ classify_intent ────────────────────────────┐
//!       ├─ classify_rule_type ──┬──────────────────────┤
//!       ├─ extract_attribute_tokens ─ route_attributes ┤
//!       └─ analyzer.analyze ─ extract_application_name ┴─ ExtractionResult
//! ```
//!
//! Only the analyzer can fail. The keyword classifiers and the attribute
//! extractor are total and run on the raw text.

pub mod application;
pub mod attributes;
pub mod intent;
pub mod keywords;
pub mod result;
pub mod rule_type;

pub use application::{extract_application_name, APPLICATION_PREPOSITIONS};
pub use attributes::{extract_attribute_tokens, route_attributes, AttributeRoute};
pub use intent::{classify_intent, Intent};
pub use keywords::KeywordRule;
pub use result::ExtractionResult;
pub use rule_type::classify_rule_type;

use tracing::debug;

use crate::analysis::LinguisticAnalyzer;
use crate::error::Result;

/// Extraction pipeline over an injected [`LinguisticAnalyzer`].
#[derive(Debug, Clone)]
pub struct RuleExtractor<A> {
    analyzer: A,
}

impl<A: LinguisticAnalyzer> RuleExtractor<A> {
    pub fn new(analyzer: A) -> Self {
        Self { analyzer }
    }

    /// Extract the structured rule request from `text`.
    ///
    /// Fails only when the analyzer does; there is no partial result.
    pub fn extract(&self, text: &str) -> Result<ExtractionResult> {
        let doc = self.analyzer.analyze(text)?;

        let intent = classify_intent(text);
        let rule_type = classify_rule_type(text);
        debug!(?intent, ?rule_type, "Classified request");

        let application_name = extract_application_name(&doc);

        let tokens = extract_attribute_tokens(text);
        debug!(count = tokens.len(), tokens = ?tokens, "Extracted attribute tokens");

        let route = route_attributes(rule_type, tokens);

        Ok(ExtractionResult::assemble(
            intent,
            rule_type,
            application_name,
            route,
        ))
    }
}
