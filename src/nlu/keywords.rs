//! Priority-ordered keyword tables.
//!
//! Both keyword classifiers are an ordered list of `(result, keywords)` rules
//! evaluated top to bottom; the first rule with any keyword present as a
//! substring of the lower-cased text wins.
//!
//! Matching is plain substring search, so "rebuild" matches "build".

/// One row of a keyword table.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T> {
    pub result: T,
    pub keywords: &'static [&'static str],
}

impl<T> KeywordRule<T> {
    /// Keywords must already be lower-case.
    pub fn matches(&self, text_lower: &str) -> bool {
        self.keywords.iter().any(|kw| text_lower.contains(kw))
    }
}

/// Result of the first rule matching `text`, or `None`.
pub fn first_match<T: Copy>(rules: &[KeywordRule<T>], text: &str) -> Option<T> {
    let text_lower = text.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&text_lower))
        .map(|rule| rule.result)
}
