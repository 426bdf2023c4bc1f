//! Education section: degrees, institutions and majors.
//!
//! Institutions come from a regex over well-known institute naming plus an
//! optional NER pass whose organisations must mention an institution cue.

use std::collections::BTreeSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extraction::gazetteer::Gazetteer;
use crate::extraction::ner::{EntityLabel, EntityRecognizer};
use crate::extraction::normalize::{collapse_whitespace, title_case};
use crate::extraction::section::SectionLocator;

const EDUCATION_HEADINGS: &[&str] = &[
    "education",
    "academics",
    "qualification",
    "educational background",
    "academic background",
];

const EDUCATION_STOP_HEADINGS: &[&str] = &[
    "experience",
    "skills",
    "projects",
    "certifications",
    "summary",
    "contact",
    "profile",
    "about me",
    "interests",
    "hobbies",
    "awards",
    "achievements",
    "references",
    "extracurricular",
    "activities",
    "courses",
    "training",
    "seminars",
    "conferences",
    "workshops",
    "publications",
    "patents",
    "research",
    "professional affiliations",
    "associations",
    "languages",
    "work experience",
    "career summary",
    "job history",
    "employment history",
    "professional experience",
    "job experience",
    "work summary",
    "technical expertise and skills",
    "academic projects",
];

/// Organisation entities are only kept as institutions when they mention one
/// of these.
const INSTITUTION_CUES: &[&str] = &[
    "university",
    "college",
    "institute",
    "iit",
    "iiit",
    "nit",
    "iisc",
    "bit",
    "bits",
    "vit",
];

static EDUCATION_SECTION: Lazy<SectionLocator> =
    Lazy::new(|| SectionLocator::new(EDUCATION_HEADINGS, EDUCATION_STOP_HEADINGS));

const DEGREE_ABBREVIATIONS: &str = r"B\.?\s?Tech|M\.?\s?Tech|B\.?\s?E|M\.?\s?E|B\.?\s?Sc|M\.?\s?Sc|B\.?\s?C\.?\s?A|M\.?\s?C\.?\s?A|B\.?\s?A|M\.?\s?A|MBA|Ph\.?\s?D";

static DEGREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:{DEGREE_ABBREVIATIONS}|Bachelor(?:\s+of\s+(?:Technology|Science|Engineering|Arts|Computer\s+Applications))?|Master\s+of\s+(?:Technology|Science|Engineering|Arts|Business\s+Administration|Computer\s+Applications))(?:/\s?(?:{DEGREE_ABBREVIATIONS}))?\b"
    ))
    .unwrap()
});

static INSTITUTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:IISc[-\s]?(?:Bangalore|Bengaluru|Bangaluru)|IIT[-\s]?[A-Z][a-z]+|NIT[-\s]?[A-Z][a-z]+|IIIT[-\s]?[A-Z][a-z]+|BITS[-\s]?[A-Z][a-z]+)\b",
    )
    .unwrap()
});

/// Degrees, institutions and majors found in the education section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationRecord {
    pub degrees: BTreeSet<String>,
    pub institutions: BTreeSet<String>,
    pub majors: BTreeSet<String>,
}

impl EducationRecord {
    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty() && self.institutions.is_empty() && self.majors.is_empty()
    }
}

#[derive(Clone)]
pub struct EducationExtractor {
    majors: Arc<Gazetteer>,
    ner: Option<Arc<dyn EntityRecognizer>>,
}

impl EducationExtractor {
    pub fn new(majors: Arc<Gazetteer>, ner: Option<Arc<dyn EntityRecognizer>>) -> Self {
        Self { majors, ner }
    }

    pub fn with_ner(mut self, ner: Arc<dyn EntityRecognizer>) -> Self {
        self.ner = Some(ner);
        self
    }

    pub fn extract(&self, text: &str) -> EducationRecord {
        let lines: Vec<&str> = text.lines().collect();
        let Some(section) = EDUCATION_SECTION.find(&lines) else {
            return EducationRecord::default();
        };
        let body = section.body_text();

        EducationRecord {
            degrees: extract_degrees(&body),
            institutions: self.extract_institutions(&body),
            majors: extract_majors(&body, &self.majors),
        }
    }

    fn extract_institutions(&self, body: &str) -> BTreeSet<String> {
        let mut institutions: BTreeSet<String> = INSTITUTION
            .find_iter(body)
            .map(|m| collapse_whitespace(m.as_str()))
            .collect();

        let Some(ner) = &self.ner else {
            return institutions;
        };

        for line in body.lines().filter(|l| !l.trim().is_empty()) {
            match ner.entities(line) {
                Ok(entities) => institutions.extend(
                    entities
                        .into_iter()
                        .filter(|e| e.label == EntityLabel::Org)
                        .map(|e| collapse_whitespace(&e.text))
                        .filter(|org| is_institution(org)),
                ),
                Err(e) => {
                    warn!("Entity recognizer '{}' failed on education line: {}", ner.name(), e);
                    break;
                }
            }
        }

        institutions
    }
}

pub fn extract_degrees(text: &str) -> BTreeSet<String> {
    DEGREE
        .find_iter(text)
        .map(|m| collapse_whitespace(m.as_str()))
        .collect()
}

/// Every gazetteer major occurring anywhere in `text`, title-cased.
pub fn extract_majors(text: &str, majors: &Gazetteer) -> BTreeSet<String> {
    let haystack = text.to_lowercase();
    majors
        .iter()
        .filter(|major| haystack.contains(*major))
        .map(title_case)
        .collect()
}

fn is_institution(org: &str) -> bool {
    let lower = org.to_lowercase();
    INSTITUTION_CUES.iter().any(|cue| lower.contains(cue))
}
