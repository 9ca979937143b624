//! Linguistic analysis adapter.
//!
//! The extraction pipeline consumes linguistic structure through the narrow
//! [`LinguisticAnalyzer`] trait: tokens with part-of-speech tags and
//! dependency heads, plus noun-chunk spans. Any engine producing that shape
//! can be swapped in underneath.
//!
//! ## Architecture
//!
//! ```text
//! "Create a correlation rule for Active Directory"
//!     │
//!     ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  LinguisticAnalyzer                                              │
//! │  - ShallowParser   (built-in, lexicon-driven)                    │
//! │  - SharedEngine    (process-wide lazily initialised parser)     │
//! │  - MockAnalyzer    (hand-built fixtures for tests)               │
//! └─────────────────────────────────────────────────────────────────┘
//!     │
//!     ▼
//! AnnotatedDoc {
//!     tokens:      [Create:VERB:ROOT, a:DET:det, ..., Directory:PROPN:pobj→for],
//!     noun_chunks: ["a correlation rule", "Active Directory"],
//! }
//! ```

mod engine;
mod model;
mod shallow;

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use engine::{shared_engine, SharedEngine};
pub use model::{LanguageModel, ModelLoader, ModelSource, MODEL_ENV_VAR};
pub use shallow::ShallowParser;

use crate::error::AnalysisError;

/// Coarse part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Det,
    Adp,
    Verb,
    Pron,
    Conj,
    Adv,
    Adj,
    Noun,
    Propn,
    Num,
    Punct,
}

impl PartOfSpeech {
    /// Universal-dependencies style tag.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Det => "DET",
            Self::Adp => "ADP",
            Self::Verb => "VERB",
            Self::Pron => "PRON",
            Self::Conj => "CCONJ",
            Self::Adv => "ADV",
            Self::Adj => "ADJ",
            Self::Noun => "NOUN",
            Self::Propn => "PROPN",
            Self::Num => "NUM",
            Self::Punct => "PUNCT",
        }
    }

    /// Nouns and proper nouns can head a noun chunk.
    pub fn is_nominal(&self) -> bool {
        matches!(self, Self::Noun | Self::Propn)
    }
}

/// Dependency relation of a token to its head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepRole {
    Root,
    Nsubj,
    Dobj,
    /// Object of a preposition ("Directory" in "for Active Directory")
    Pobj,
    Prep,
    Det,
    Amod,
    Compound,
    Nummod,
    Cc,
    Punct,
    Dep,
}

impl DepRole {
    /// ClearNLP style label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Root => "ROOT",
            Self::Nsubj => "nsubj",
            Self::Dobj => "dobj",
            Self::Pobj => "pobj",
            Self::Prep => "prep",
            Self::Det => "det",
            Self::Amod => "amod",
            Self::Compound => "compound",
            Self::Nummod => "nummod",
            Self::Cc => "cc",
            Self::Punct => "punct",
            Self::Dep => "dep",
        }
    }
}

/// A single analysed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    /// Literal text as it appears in the input
    pub text: String,
    /// Lower-cased text
    pub lower: String,
    pub pos: PartOfSpeech,
    pub dep: DepRole,
    /// Position in the token sequence
    pub index: usize,
    /// Byte offset into the source text
    pub offset: usize,
    /// Index of the syntactic head; the sentence root is its own head
    pub head: usize,
}

impl AnnotatedToken {
    pub fn new(
        text: impl Into<String>,
        pos: PartOfSpeech,
        dep: DepRole,
        index: usize,
        offset: usize,
        head: usize,
    ) -> Self {
        let text = text.into();
        Self {
            lower: text.to_lowercase(),
            text,
            pos,
            dep,
            index,
            offset,
            head,
        }
    }

    /// Byte offset one past the end of the token.
    pub fn end_offset(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// A contiguous noun-phrase span over the token sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NounChunk {
    /// First token index
    pub start: usize,
    /// One past the last token index
    pub end: usize,
    /// Index of the chunk's syntactic root
    pub root: usize,
    /// Full text of the span
    pub text: String,
}

impl NounChunk {
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

/// Linguistic structure of one input text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedDoc {
    pub text: String,
    pub tokens: Vec<AnnotatedToken>,
    pub noun_chunks: Vec<NounChunk>,
}

impl AnnotatedDoc {
    pub fn new(
        text: impl Into<String>,
        tokens: Vec<AnnotatedToken>,
        noun_chunks: Vec<NounChunk>,
    ) -> Self {
        Self {
            text: text.into(),
            tokens,
            noun_chunks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The syntactic head of `token`, if its head index is in range.
    pub fn head_of(&self, token: &AnnotatedToken) -> Option<&AnnotatedToken> {
        self.tokens.get(token.head)
    }

    /// First noun chunk whose span covers the token at `index`.
    pub fn chunk_containing(&self, index: usize) -> Option<&NounChunk> {
        self.noun_chunks.iter().find(|chunk| chunk.contains(index))
    }

    pub fn chunk_root(&self, chunk: &NounChunk) -> Option<&AnnotatedToken> {
        self.tokens.get(chunk.root)
    }
}

/// Turns raw text into an [`AnnotatedDoc`].
///
/// Implementations must be safe to share across threads; analysis is
/// read-only once the engine is initialised.
pub trait LinguisticAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Result<AnnotatedDoc, AnalysisError>;
}

impl<T: LinguisticAnalyzer + ?Sized> LinguisticAnalyzer for &T {
    fn analyze(&self, text: &str) -> Result<AnnotatedDoc, AnalysisError> {
        (**self).analyze(text)
    }
}

impl<T: LinguisticAnalyzer + ?Sized> LinguisticAnalyzer for Arc<T> {
    fn analyze(&self, text: &str) -> Result<AnnotatedDoc, AnalysisError> {
        (**self).analyze(text)
    }
}

/// A mock analyzer for testing.
///
/// Returns pre-built documents keyed by input text. Unknown text yields an
/// empty document; a failing mock returns an engine error for every call.
#[derive(Debug, Default)]
pub struct MockAnalyzer {
    docs: HashMap<String, AnnotatedDoc>,
    failure: Option<String>,
}

impl MockAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doc(mut self, doc: AnnotatedDoc) -> Self {
        self.docs.insert(doc.text.clone(), doc);
        self
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            docs: HashMap::new(),
            failure: Some(message.into()),
        }
    }
}

impl LinguisticAnalyzer for MockAnalyzer {
    fn analyze(&self, text: &str) -> Result<AnnotatedDoc, AnalysisError> {
        if let Some(message) = &self.failure {
            return Err(AnalysisError::Engine {
                message: message.clone(),
            });
        }

        Ok(self
            .docs
            .get(text)
            .cloned()
            .unwrap_or_else(|| AnnotatedDoc::new(text, Vec::new(), Vec::new())))
    }
}
