//! Named-entity recognition capability.
//!
//! Name and institution extraction fall back to an `EntityRecognizer` when
//! their rule-based passes find nothing. The recogniser is injected, so a
//! statistical model, a remote service or a test stub can stand behind it.
//! `RuleBasedRecognizer` is the built-in, dependency-free implementation.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityLabel {
    Person,
    Org,
    Skill,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

#[derive(Debug, Error)]
pub enum NerError {
    #[error("NER backend unavailable: {0}")]
    Unavailable(String),

    #[error("NER failed: {0}")]
    Failed(String),
}

/// Tags spans of text with entity labels.
pub trait EntityRecognizer: Send + Sync {
    fn entities(&self, text: &str) -> Result<Vec<Entity>, NerError>;

    fn name(&self) -> &str;

    /// Whether this recogniser can emit `EntityLabel::Skill` spans.
    fn tags_skills(&self) -> bool {
        false
    }
}

type RecognizerInit = Box<dyn Fn() -> Result<Box<dyn EntityRecognizer>, NerError> + Send + Sync>;

/// Defers building the wrapped recogniser until the first call, so an
/// expensive model load only happens when a fallback is actually needed.
/// A failed load is retried on the next call.
pub struct LazyRecognizer {
    name: String,
    init: RecognizerInit,
    inner: OnceCell<Box<dyn EntityRecognizer>>,
    tags_skills: bool,
}

impl LazyRecognizer {
    pub fn new<F>(name: impl Into<String>, init: F) -> Self
    where
        F: Fn() -> Result<Box<dyn EntityRecognizer>, NerError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            init: Box::new(init),
            inner: OnceCell::new(),
            tags_skills: false,
        }
    }

    /// Declares that the deferred recogniser emits skill entities. Needed
    /// up front, since the wrapped model is not loaded yet.
    pub fn tagging_skills(mut self) -> Self {
        self.tags_skills = true;
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.get().is_some()
    }
}

impl EntityRecognizer for LazyRecognizer {
    fn entities(&self, text: &str) -> Result<Vec<Entity>, NerError> {
        let inner = self.inner.get_or_try_init(|| {
            tracing::info!("Loading entity recognizer '{}'", self.name);
            (self.init)()
        })?;
        inner.entities(text)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn tags_skills(&self) -> bool {
        self.tags_skills
    }
}

/// Words that mark a capitalised span as an organisation.
const ORG_CUES: &[&str] = &[
    "university",
    "college",
    "institute",
    "institution",
    "school",
    "academy",
    "iit",
    "iiit",
    "nit",
    "iisc",
    "bit",
    "bits",
    "vit",
    "inc",
    "ltd",
    "llc",
    "corporation",
    "corp",
    "technologies",
    "labs",
];

/// Lower-case words allowed inside an organisation span.
const CONNECTORS: &[&str] = &["of", "and", "for", "the", "&", "at"];

/// Deterministic capitalised-span recogniser.
///
/// Works line by line:
/// - a run of capitalised tokens containing an organisation cue → `Org`
/// - a run of 2–3 purely alphabetic capitalised tokens → `Person`
/// - any other run of two or more capitalised tokens → `Other("PROPN")`
#[derive(Debug, Clone, Default)]
pub struct RuleBasedRecognizer;

impl RuleBasedRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl EntityRecognizer for RuleBasedRecognizer {
    fn entities(&self, text: &str) -> Result<Vec<Entity>, NerError> {
        Ok(text.lines().flat_map(capitalised_spans).collect())
    }

    fn name(&self) -> &str {
        "rule-based"
    }
}

fn capitalised_spans(line: &str) -> Vec<Entity> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let mut entities = Vec::new();
    let mut i = 0;

    while i < words.len() {
        let word = strip_edges(words[i]);
        if !is_capitalised(word) {
            i += 1;
            continue;
        }

        let mut span = vec![word];
        let mut closed = ends_clause(words[i]);
        i += 1;
        while i < words.len() && !closed {
            let next = strip_edges(words[i]);
            if is_capitalised(next) {
                span.push(next);
                closed = ends_clause(words[i]);
                i += 1;
            } else if CONNECTORS.contains(&next.to_lowercase().as_str())
                && words
                    .get(i + 1)
                    .is_some_and(|w| is_capitalised(strip_edges(w)))
            {
                span.push(next);
                i += 1;
            } else {
                break;
            }
        }

        entities.extend(classify(&span));
    }

    entities
}

/// Labels a capitalised run. Runs without an organisation cue are split at
/// their connectors first, so "Resume of Priya Sharma" yields the person only.
fn classify(span: &[&str]) -> Vec<Entity> {
    let has_org_cue = span
        .iter()
        .any(|w| ORG_CUES.contains(&w.to_lowercase().as_str()));
    if has_org_cue {
        return vec![Entity::new(span.join(" "), EntityLabel::Org)];
    }

    span.split(|w| CONNECTORS.contains(&w.to_lowercase().as_str()))
        .filter_map(classify_plain)
        .collect()
}

fn classify_plain(span: &[&str]) -> Option<Entity> {
    if span.len() < 2 {
        return None;
    }
    let text = span.join(" ");
    let all_alphabetic = span
        .iter()
        .all(|w| w.chars().all(|c| c.is_alphabetic() || c == '\'' || c == '-'));
    if span.len() <= 3 && all_alphabetic {
        Some(Entity::new(text, EntityLabel::Person))
    } else {
        Some(Entity::new(text, EntityLabel::Other("PROPN".to_string())))
    }
}

fn strip_edges(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric() && c != '&')
}

fn is_capitalised(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn ends_clause(raw: &str) -> bool {
    raw.ends_with([',', ';', ':', '|', '.', ')'])
}
