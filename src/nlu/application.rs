//! Application-name extraction
//!
//! The target system is the noun phrase governed by "for", "from" or "on":
//!
//! 1. Find the first prepositional object whose head is one of those
//!    prepositions and return the noun chunk covering it (or the bare token
//!    when no chunk covers it)
//! 2. Otherwise return the first noun chunk whose root is headed by one of
//!    those prepositions

use tracing::debug;

use crate::analysis::{AnnotatedDoc, AnnotatedToken, DepRole};

/// Prepositions that introduce a target application.
pub const APPLICATION_PREPOSITIONS: &[&str] = &["for", "from", "on"];

pub fn extract_application_name(doc: &AnnotatedDoc) -> Option<String> {
    if let Some(name) = from_prepositional_object(doc) {
        return Some(name);
    }

    let fallback = doc
        .noun_chunks
        .iter()
        .find(|chunk| {
            doc.chunk_root(chunk)
                .and_then(|root| doc.head_of(root))
                .is_some_and(is_application_preposition)
        })
        .map(|chunk| chunk.text.clone());

    if let Some(name) = &fallback {
        debug!(application = %name, "Application name from noun-chunk fallback");
    }
    fallback
}

fn from_prepositional_object(doc: &AnnotatedDoc) -> Option<String> {
    let token = doc.tokens.iter().find(|token| {
        token.dep == DepRole::Pobj && doc.head_of(token).is_some_and(is_application_preposition)
    })?;

    let name = match doc.chunk_containing(token.index) {
        Some(chunk) => chunk.text.clone(),
        None => token.text.clone(),
    };

    debug!(
        application = %name,
        anchor = %token.text,
        "Application name from prepositional object"
    );
    Some(name)
}

fn is_application_preposition(head: &AnnotatedToken) -> bool {
    let lower = head.text.to_lowercase();
    APPLICATION_PREPOSITIONS.contains(&lower.as_str())
}
