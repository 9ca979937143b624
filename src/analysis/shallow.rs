//! Lexicon-driven shallow parser.
//!
//! Produces the token / dependency / noun-chunk structure the extraction
//! pipeline needs without an external NLP runtime:
//!
//! 1. Split on whitespace, peeling leading and trailing punctuation into
//!    their own tokens ("'uid'" → `'`, `uid`, `'`)
//! 2. Tag closed-class words from the language model; unknown capitalised
//!    words are proper nouns, everything else is a noun
//! 3. Group determiner/adjective/number/noun runs into noun chunks
//! 4. Attach chunk roots to the preceding preposition or verb

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::{debug, warn};

use super::model::{LanguageModel, ModelLoader};
use super::{AnnotatedDoc, AnnotatedToken, DepRole, LinguisticAnalyzer, NounChunk, PartOfSpeech};
use crate::error::AnalysisError;

/// The built-in linguistic engine.
#[derive(Debug, Clone)]
pub struct ShallowParser {
    model_name: String,
    lexicon: HashMap<String, PartOfSpeech>,
}

/// A whitespace/punctuation-delimited piece of the input.
#[derive(Debug, Clone, Copy)]
struct RawToken<'a> {
    text: &'a str,
    offset: usize,
    punct: bool,
}

/// Token span of a noun chunk plus its root index.
#[derive(Debug, Clone, Copy)]
struct ChunkSpan {
    start: usize,
    end: usize,
    root: usize,
}

impl ShallowParser {
    pub fn new(model: LanguageModel) -> Result<Self, AnalysisError> {
        let mut lexicon = HashMap::new();

        for (class, words) in model.classes() {
            let pos = class_pos(class);
            for word in words {
                let key = word.trim().to_lowercase();
                match lexicon.insert(key.clone(), pos) {
                    Some(existing) if existing != pos => {
                        return Err(AnalysisError::InvalidModel {
                            model: model.name.clone(),
                            reason: format!("'{}' listed under more than one class", key),
                        });
                    }
                    Some(_) => {
                        warn!(model = %model.name, word = %key, class, "Duplicate word in language model");
                    }
                    None => {}
                }
            }
        }

        if !lexicon.values().any(|pos| *pos == PartOfSpeech::Adp) {
            return Err(AnalysisError::InvalidModel {
                model: model.name,
                reason: "no prepositions defined".to_string(),
            });
        }

        Ok(Self {
            model_name: model.name,
            lexicon,
        })
    }

    /// Load a model through `loader` and build the parser from it.
    pub fn from_loader(loader: &ModelLoader) -> Result<Self, AnalysisError> {
        Self::new(loader.load()?)
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    fn tag(&self, raw: &[RawToken<'_>]) -> Vec<PartOfSpeech> {
        let mut tags: Vec<PartOfSpeech> = Vec::with_capacity(raw.len());

        for token in raw {
            let sentence_initial = tags.iter().all(|pos| *pos == PartOfSpeech::Punct);
            let capitalised = token.text.chars().next().is_some_and(char::is_uppercase);

            let pos = if token.punct {
                PartOfSpeech::Punct
            } else if let Some(pos) = self.lexicon.get(&token.text.to_lowercase()) {
                match (pos, tags.last()) {
                    // "for Target": a capitalised open-class word mid-sentence is a name
                    (PartOfSpeech::Adj | PartOfSpeech::Verb, _)
                        if capitalised && !sentence_initial =>
                    {
                        PartOfSpeech::Propn
                    }
                    // "a build map rule": a verb after a determiner is nominal
                    (PartOfSpeech::Verb, Some(PartOfSpeech::Det | PartOfSpeech::Adj)) => {
                        PartOfSpeech::Noun
                    }
                    _ => *pos,
                }
            } else if token.text.chars().all(|c| c.is_ascii_digit()) {
                PartOfSpeech::Num
            } else if capitalised {
                PartOfSpeech::Propn
            } else {
                PartOfSpeech::Noun
            };
            tags.push(pos);
        }

        tags
    }
}

impl LinguisticAnalyzer for ShallowParser {
    fn analyze(&self, text: &str) -> Result<AnnotatedDoc, AnalysisError> {
        let raw = split_tokens(text);
        if raw.is_empty() {
            return Ok(AnnotatedDoc::new(text, Vec::new(), Vec::new()));
        }

        let tags = self.tag(&raw);
        let spans = chunk_spans(&tags);
        let (deps, heads) = attach(&tags, &spans);

        let tokens: Vec<AnnotatedToken> = raw
            .iter()
            .enumerate()
            .map(|(i, r)| AnnotatedToken::new(r.text, tags[i], deps[i], i, r.offset, heads[i]))
            .collect();

        let noun_chunks = spans
            .iter()
            .map(|span| NounChunk {
                start: span.start,
                end: span.end,
                root: span.root,
                text: text[tokens[span.start].offset..tokens[span.end - 1].end_offset()]
                    .to_string(),
            })
            .collect::<Vec<_>>();

        debug!(
            model = %self.model_name,
            tokens = tokens.len(),
            noun_chunks = noun_chunks.len(),
            parse = %ParseSummary(&tokens),
            "Analysed text"
        );

        Ok(AnnotatedDoc::new(text, tokens, noun_chunks))
    }
}

/// `text/POS/dep` per token, formatted only when the event is recorded.
struct ParseSummary<'a>(&'a [AnnotatedToken]);

impl fmt::Display for ParseSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}/{}/{}", token.text, token.pos.label(), token.dep.label())?;
        }
        Ok(())
    }
}

fn class_pos(class: &str) -> PartOfSpeech {
    match class {
        "determiners" => PartOfSpeech::Det,
        "prepositions" => PartOfSpeech::Adp,
        "pronouns" => PartOfSpeech::Pron,
        "conjunctions" => PartOfSpeech::Conj,
        "adverbs" => PartOfSpeech::Adv,
        "adjectives" => PartOfSpeech::Adj,
        _ => PartOfSpeech::Verb,
    }
}

fn is_boundary_punct(c: char) -> bool {
    !c.is_alphanumeric() && c != '_'
}

/// Split input into words and boundary punctuation, keeping byte offsets.
fn split_tokens(text: &str) -> Vec<RawToken<'_>> {
    let mut pieces = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                pieces.push((s, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        pieces.push((s, text.len()));
    }

    let mut tokens = Vec::new();
    for (s, e) in pieces {
        let piece = &text[s..e];

        let core_start = piece
            .char_indices()
            .find(|(_, c)| !is_boundary_punct(*c))
            .map(|(i, _)| i)
            .unwrap_or(piece.len());
        let core_end = piece
            .char_indices()
            .rev()
            .find(|(_, c)| !is_boundary_punct(*c))
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(core_start);

        for (i, c) in piece[..core_start].char_indices() {
            tokens.push(RawToken {
                text: &piece[i..i + c.len_utf8()],
                offset: s + i,
                punct: true,
            });
        }
        if core_start < core_end {
            tokens.push(RawToken {
                text: &piece[core_start..core_end],
                offset: s + core_start,
                punct: false,
            });
        }
        for (i, c) in piece[core_end..].char_indices() {
            let at = core_end + i;
            tokens.push(RawToken {
                text: &piece[at..at + c.len_utf8()],
                offset: s + at,
                punct: true,
            });
        }
    }

    tokens
}

fn in_noun_phrase(pos: PartOfSpeech) -> bool {
    matches!(
        pos,
        PartOfSpeech::Det
            | PartOfSpeech::Adj
            | PartOfSpeech::Num
            | PartOfSpeech::Noun
            | PartOfSpeech::Propn
    )
}

/// Maximal nominal runs, each ending at its last noun. A lone pronoun is
/// its own chunk.
fn chunk_spans(tags: &[PartOfSpeech]) -> Vec<ChunkSpan> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < tags.len() {
        if tags[i] == PartOfSpeech::Pron {
            spans.push(ChunkSpan {
                start: i,
                end: i + 1,
                root: i,
            });
            i += 1;
            continue;
        }
        if !in_noun_phrase(tags[i]) {
            i += 1;
            continue;
        }

        let start = i;
        let mut last_nominal = None;
        while i < tags.len() && in_noun_phrase(tags[i]) {
            if tags[i] == PartOfSpeech::Det && last_nominal.is_some() {
                break;
            }
            if tags[i].is_nominal() {
                last_nominal = Some(i);
            }
            i += 1;
        }

        if let Some(root) = last_nominal {
            spans.push(ChunkSpan {
                start,
                end: root + 1,
                root,
            });
        }
    }

    spans
}

/// Assign a dependency role and head to every token.
fn attach(tags: &[PartOfSpeech], spans: &[ChunkSpan]) -> (Vec<DepRole>, Vec<usize>) {
    // Quotes and brackets sit between a preposition and its object
    let governor = |span: &ChunkSpan| {
        (0..span.start)
            .rev()
            .find(|k| tags[*k] != PartOfSpeech::Punct)
            .map(|k| (k, tags[k]))
    };

    // A chunk governed by a preposition never roots the sentence ("for SAP")
    let root = tags
        .iter()
        .position(|pos| *pos == PartOfSpeech::Verb)
        .or_else(|| {
            spans
                .iter()
                .find(|span| !matches!(governor(span), Some((_, PartOfSpeech::Adp))))
                .map(|span| span.root)
        })
        .or_else(|| tags.iter().position(|pos| *pos != PartOfSpeech::Punct))
        .unwrap_or(0);

    let mut deps = vec![DepRole::Dep; tags.len()];
    let mut heads = vec![root; tags.len()];
    deps[root] = DepRole::Root;

    for span in spans {
        for j in span.start..span.end {
            if j == span.root || j == root {
                continue;
            }
            deps[j] = match tags[j] {
                PartOfSpeech::Det => DepRole::Det,
                PartOfSpeech::Adj => DepRole::Amod,
                PartOfSpeech::Num => DepRole::Nummod,
                _ => DepRole::Compound,
            };
            heads[j] = span.root;
        }

        if span.root == root {
            continue;
        }

        match governor(span) {
            Some((k, PartOfSpeech::Adp)) => {
                deps[span.root] = DepRole::Pobj;
                heads[span.root] = k;
            }
            _ if span.root < root => deps[span.root] = DepRole::Nsubj,
            Some((k, PartOfSpeech::Verb)) => {
                deps[span.root] = DepRole::Dobj;
                heads[span.root] = k;
            }
            _ => {}
        }
    }

    let chunk_roots: HashSet<usize> = spans.iter().map(|span| span.root).collect();

    for (i, pos) in tags.iter().enumerate() {
        if i == root {
            continue;
        }
        match pos {
            PartOfSpeech::Adp => {
                deps[i] = DepRole::Prep;
                heads[i] = (0..i)
                    .rev()
                    .find(|j| tags[*j] == PartOfSpeech::Verb || chunk_roots.contains(j))
                    .unwrap_or(root);
            }
            PartOfSpeech::Conj => deps[i] = DepRole::Cc,
            PartOfSpeech::Punct => deps[i] = DepRole::Punct,
            _ => {}
        }
    }

    (deps, heads)
}
