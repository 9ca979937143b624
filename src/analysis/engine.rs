//! Process-wide engine handle.
//!
//! Loading the language model is the only expensive step of extraction, so a
//! single parser is built on first use and shared read-only afterwards.

use once_cell::sync::OnceCell;
use tracing::debug;

use super::model::ModelLoader;
use super::shallow::ShallowParser;
use super::{AnnotatedDoc, LinguisticAnalyzer};
use crate::error::AnalysisError;

static ENGINE: OnceCell<ShallowParser> = OnceCell::new();

/// The shared parser, initialised from [`ModelLoader::from_env`] on first call.
///
/// A failed initialisation is returned to the caller and not cached, so a
/// later call can succeed once the model is in place.
pub fn shared_engine() -> Result<&'static ShallowParser, AnalysisError> {
    ENGINE.get_or_try_init(|| {
        let loader = ModelLoader::from_env();
        debug!(source = ?loader.source(), "Initialising shared linguistic engine");
        ShallowParser::from_loader(&loader)
    })
}

/// Analyzer that delegates to [`shared_engine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedEngine;

impl LinguisticAnalyzer for SharedEngine {
    fn analyze(&self, text: &str) -> Result<AnnotatedDoc, AnalysisError> {
        shared_engine()?.analyze(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_engine_initialises_once() {
        let first = shared_engine().unwrap();
        let second = shared_engine().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_shared_engine_analyzes() {
        let doc = SharedEngine.analyze("rule for Okta").unwrap();
        assert_eq!(doc.tokens.len(), 3);
    }
}
