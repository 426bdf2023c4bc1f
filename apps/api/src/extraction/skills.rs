//! Skill extraction ensemble.
//!
//! Each `SkillSource` proposes raw skill strings; `SkillExtractor` runs them
//! all concurrently, cleans every string the same way and unions the result.
//! A failing source is logged and contributes nothing.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::extraction::gazetteer::Gazetteer;
use crate::extraction::ner::{EntityLabel, EntityRecognizer, NerError};
use crate::extraction::normalize::clean_skill;
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, SKILLS_PROMPT_TEMPLATE};
use crate::llm_client::{JsonLlm, LlmError};

#[derive(Debug, Error)]
pub enum SkillSourceError {
    #[error(transparent)]
    Ner(#[from] NerError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("unexpected skill payload: {0}")]
    Payload(String),

    #[error("skill source task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[async_trait]
pub trait SkillSource: Send + Sync {
    fn name(&self) -> &str;

    async fn skills(&self, text: &str) -> Result<Vec<String>, SkillSourceError>;
}

/// Whole-word, case-insensitive lookup of every skills-gazetteer term.
pub struct GazetteerSkillSource {
    matchers: Vec<(String, Regex)>,
}

impl GazetteerSkillSource {
    pub fn new(gazetteer: &Gazetteer) -> Self {
        let matchers = gazetteer
            .iter()
            .filter_map(|term| {
                // \b is meaningless next to symbols such as the '+' in "c++"
                let pattern = format!(
                    r"(?i)(?:^|[^\w]){}(?:$|[^\w])",
                    regex::escape(term)
                );
                match Regex::new(&pattern) {
                    Ok(re) => Some((term.to_string(), re)),
                    Err(e) => {
                        warn!("Skipping skill term '{}': {}", term, e);
                        None
                    }
                }
            })
            .collect();
        Self { matchers }
    }

    pub fn find(&self, text: &str) -> Vec<String> {
        self.matchers
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(term, _)| term.clone())
            .collect()
    }
}

#[async_trait]
impl SkillSource for GazetteerSkillSource {
    fn name(&self) -> &str {
        "gazetteer"
    }

    async fn skills(&self, text: &str) -> Result<Vec<String>, SkillSourceError> {
        Ok(self.find(text))
    }
}

/// Entities the recogniser labels as skills. Purely numeric spans are dropped.
pub struct NerSkillSource {
    ner: Arc<dyn EntityRecognizer>,
}

impl NerSkillSource {
    pub fn new(ner: Arc<dyn EntityRecognizer>) -> Self {
        Self { ner }
    }

    /// `None` when the recogniser never emits skill entities.
    pub fn for_recognizer(ner: Arc<dyn EntityRecognizer>) -> Option<Self> {
        ner.tags_skills().then(|| Self::new(ner))
    }
}

#[async_trait]
impl SkillSource for NerSkillSource {
    fn name(&self) -> &str {
        "ner"
    }

    async fn skills(&self, text: &str) -> Result<Vec<String>, SkillSourceError> {
        let ner = self.ner.clone();
        let text = text.to_string();
        // recognisers are synchronous and may be CPU-heavy
        let entities = tokio::task::spawn_blocking(move || ner.entities(&text)).await??;
        Ok(entities
            .into_iter()
            .filter(|e| e.label == EntityLabel::Skill)
            .map(|e| e.text)
            .filter(|s| !s.trim().chars().all(|c| c.is_ascii_digit()))
            .collect())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SkillsReply {
    Object { skills: Vec<String> },
    List(Vec<String>),
}

/// Skills proposed by the LLM as `{"skills": [...]}` (a bare array is accepted).
pub struct LlmSkillSource {
    llm: Arc<dyn JsonLlm>,
}

impl LlmSkillSource {
    pub fn new(llm: Arc<dyn JsonLlm>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SkillSource for LlmSkillSource {
    fn name(&self) -> &str {
        "llm"
    }

    async fn skills(&self, text: &str) -> Result<Vec<String>, SkillSourceError> {
        let prompt = SKILLS_PROMPT_TEMPLATE.replace("{resume_text}", text);
        let value = self.llm.complete_json(&prompt, JSON_ONLY_SYSTEM).await?;
        match serde_json::from_value::<SkillsReply>(value) {
            Ok(SkillsReply::Object { skills }) | Ok(SkillsReply::List(skills)) => Ok(skills),
            Err(e) => Err(SkillSourceError::Payload(e.to_string())),
        }
    }
}

#[derive(Clone, Default)]
pub struct SkillExtractor {
    sources: Vec<Arc<dyn SkillSource>>,
}

impl SkillExtractor {
    pub fn new(sources: Vec<Arc<dyn SkillSource>>) -> Self {
        Self { sources }
    }

    pub fn with_source(mut self, source: Arc<dyn SkillSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub async fn extract(&self, text: &str) -> BTreeSet<String> {
        let results = join_all(self.sources.iter().map(|source| async move {
            (source.name(), source.skills(text).await)
        }))
        .await;

        let mut skills = BTreeSet::new();
        for (name, result) in results {
            match result {
                Ok(raw) => {
                    debug!("Skill source '{}' proposed {} skills", name, raw.len());
                    skills.extend(
                        raw.iter()
                            .map(|s| clean_skill(s))
                            .filter(|s| !s.is_empty()),
                    );
                }
                Err(e) => warn!("Skill source '{}' failed: {}", name, e),
            }
        }
        skills
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::ner::Entity;
    use serde_json::json;

    struct FixedLlm(serde_json::Value);

    #[async_trait]
    impl JsonLlm for FixedLlm {
        async fn complete_json(
            &self,
            _prompt: &str,
            _system: &str,
        ) -> Result<serde_json::Value, LlmError> {
            Ok(self.0.clone())
        }
    }

    struct SkillTagger;

    impl EntityRecognizer for SkillTagger {
        fn entities(&self, _text: &str) -> Result<Vec<Entity>, NerError> {
            Ok(vec![
                Entity::new("kubernetes", EntityLabel::Skill),
                Entity::new("2019", EntityLabel::Skill),
                Entity::new("Acme", EntityLabel::Org),
            ])
        }

        fn name(&self) -> &str {
            "tagger"
        }

        fn tags_skills(&self) -> bool {
            true
        }
    }

    fn skills_gazetteer() -> Gazetteer {
        Gazetteer::from_terms(["Python", "C++", "SQL", "Node.js", "Java", "Machine Learning"])
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_gazetteer_source_matches_whole_words() {
        let source = GazetteerSkillSource::new(&skills_gazetteer());
        let mut found = source.find("Python, C++ and NoSQL; some JavaScript; machine learning");
        found.sort();
        assert_eq!(found, vec!["c++", "machine learning", "python"]);
    }

    #[test]
    fn test_gazetteer_source_handles_dotted_terms() {
        let source = GazetteerSkillSource::new(&skills_gazetteer());
        assert_eq!(source.find("Backend in node.js"), vec!["node.js"]);
    }

    #[tokio::test]
    async fn test_ner_source_keeps_skill_entities() {
        let source = NerSkillSource::new(Arc::new(SkillTagger));
        let skills = source.skills("irrelevant").await.unwrap();
        assert_eq!(skills, vec!["kubernetes"]);
    }

    #[test]
    fn test_ner_source_requires_skill_tagging_recognizer() {
        assert!(NerSkillSource::for_recognizer(Arc::new(SkillTagger)).is_some());
        assert!(
            NerSkillSource::for_recognizer(Arc::new(crate::extraction::RuleBasedRecognizer::new()))
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_llm_source_accepts_object_and_array() {
        let object = LlmSkillSource::new(Arc::new(FixedLlm(json!({"skills": ["Rust", "gRPC"]}))));
        assert_eq!(object.skills("cv").await.unwrap(), vec!["Rust", "gRPC"]);

        let array = LlmSkillSource::new(Arc::new(FixedLlm(json!(["Go"]))));
        assert_eq!(array.skills("cv").await.unwrap(), vec!["Go"]);
    }

    #[tokio::test]
    async fn test_llm_source_rejects_unexpected_shape() {
        let source = LlmSkillSource::new(Arc::new(FixedLlm(json!({"skills": "Rust"}))));
        let err = source.skills("cv").await.unwrap_err();
        assert!(matches!(err, SkillSourceError::Payload(_)));
    }

    #[tokio::test]
    async fn test_extractor_unions_and_cleans() {
        let extractor = SkillExtractor::default()
            .with_source(Arc::new(GazetteerSkillSource::new(&skills_gazetteer())))
            .with_source(Arc::new(NerSkillSource::new(Arc::new(SkillTagger))))
            .with_source(Arc::new(LlmSkillSource::new(Arc::new(FixedLlm(
                json!({"skills": ["  python ", "REST/APIs", "***"]}),
            )))));

        let skills = extractor.extract("Python and SQL").await;
        assert_eq!(skills, set(&["Kubernetes", "Python", "Rest Apis", "Sql"]));
    }

    #[tokio::test]
    async fn test_failing_source_contributes_nothing() {
        let extractor = SkillExtractor::new(vec![
            Arc::new(GazetteerSkillSource::new(&skills_gazetteer())),
            Arc::new(LlmSkillSource::new(Arc::new(crate::llm_client::DisabledLlm))),
        ]);
        assert_eq!(extractor.extract("Java developer").await, set(&["Java"]));
        assert_eq!(extractor.source_names(), vec!["gazetteer", "llm"]);
    }

    #[tokio::test]
    async fn test_no_sources_yields_empty_set() {
        assert!(SkillExtractor::default().extract("Python").await.is_empty());
    }
}
