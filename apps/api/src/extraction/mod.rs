// Deterministic résumé extraction core.
// Every extractor is a pure function of the document text plus its loaded
// gazetteers; NER and LLM backends are injected capabilities.
#![allow(dead_code)]

pub mod contact;
pub mod dates;
pub mod education;
pub mod experience;
pub mod gazetteer;
pub mod human_name;
pub mod name;
pub mod ner;
pub mod normalize;
pub mod section;
pub mod skills;

pub use contact::{extract_email, extract_phone};
pub use education::{EducationExtractor, EducationRecord};
pub use experience::{ExperienceCalculator, RoundingPolicy};
pub use gazetteer::{Gazetteer, GazetteerError};
pub use name::extract_name;
pub use ner::{EntityRecognizer, LazyRecognizer, RuleBasedRecognizer};
pub use skills::{GazetteerSkillSource, LlmSkillSource, NerSkillSource, SkillExtractor};
