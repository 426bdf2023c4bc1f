//! Résumé parsing orchestrator.
//!
//! Bytes (or a file path) become plain text through a `TextExtractor`, then
//! the independent extractors run over that text and their results are
//! assembled into a `CandidateRecord`. A field that cannot be determined is
//! left empty; only missing input and unreadable documents are errors.

#![allow(dead_code)]

pub mod handlers;
pub mod text;

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

use crate::extraction::{
    extract_email, extract_name, extract_phone, EducationExtractor, EntityRecognizer,
    ExperienceCalculator, Gazetteer, SkillExtractor,
};
use crate::models::CandidateRecord;
use text::{AutoTextExtractor, DocumentKind, ExtractError, TextExtractor};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no document supplied: provide a file path or document bytes")]
    MissingInput,

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("text extraction failed: {0}")]
    TextExtraction(#[from] ExtractError),

    #[error("extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A document to parse. In-memory bytes take precedence over the path.
#[derive(Debug, Clone, Default)]
pub struct DocumentInput {
    pub path: Option<PathBuf>,
    pub bytes: Option<Bytes>,
    /// Declared type; when absent the parser's own text extractor decides.
    pub kind: Option<DocumentKind>,
}

impl DocumentInput {
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: Some(bytes.into()),
            ..Default::default()
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    pub fn with_kind(mut self, kind: DocumentKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

#[derive(Clone)]
pub struct ResumeParser {
    text_extractor: Arc<dyn TextExtractor>,
    education: EducationExtractor,
    experience: ExperienceCalculator,
    ner: Option<Arc<dyn EntityRecognizer>>,
    skills: Option<SkillExtractor>,
}

impl ResumeParser {
    pub fn new(majors: Arc<Gazetteer>) -> Self {
        Self {
            text_extractor: Arc::new(AutoTextExtractor),
            education: EducationExtractor::new(majors, None),
            experience: ExperienceCalculator::default(),
            ner: None,
            skills: None,
        }
    }

    pub fn with_text_extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.text_extractor = extractor;
        self
    }

    /// Used by the name fallback and the institution pass.
    pub fn with_ner(mut self, ner: Arc<dyn EntityRecognizer>) -> Self {
        self.education = self.education.with_ner(ner.clone());
        self.ner = Some(ner);
        self
    }

    pub fn with_experience(mut self, experience: ExperienceCalculator) -> Self {
        self.experience = experience;
        self
    }

    pub fn with_skills(mut self, skills: SkillExtractor) -> Self {
        self.skills = Some(skills);
        self
    }

    /// Reads the document and returns its plain text.
    pub fn read_text(&self, input: &DocumentInput) -> Result<String, ParseError> {
        let bytes = match (&input.bytes, &input.path) {
            (Some(bytes), _) => bytes.clone(),
            (None, Some(path)) => Bytes::from(std::fs::read(path).map_err(|source| {
                ParseError::Io {
                    path: path.display().to_string(),
                    source,
                }
            })?),
            (None, None) => return Err(ParseError::MissingInput),
        };

        let text = match input.kind {
            Some(kind) => kind.extractor().extract_text(&bytes)?,
            None => self.text_extractor.extract_text(&bytes)?,
        };
        debug!("Extracted {} chars from {} byte document", text.len(), bytes.len());
        Ok(text)
    }

    /// Synchronous parse without skill extraction.
    pub fn parse(&self, input: &DocumentInput) -> Result<CandidateRecord, ParseError> {
        let text = self.read_text(input)?;
        Ok(self.extract(&text))
    }

    /// Runs every deterministic extractor over `text`.
    pub fn extract(&self, text: &str) -> CandidateRecord {
        let (first_name, last_name) = extract_name(text, self.ner.as_deref());
        CandidateRecord {
            first_name,
            last_name,
            email: extract_email(text),
            phone: extract_phone(text),
            total_experience: self.experience.total_experience(text),
            education: self.education.extract(text),
            skills: None,
        }
    }

    /// Full parse for async callers: text extraction and the deterministic
    /// extractors run on the blocking pool while skill extraction (when
    /// configured) runs concurrently.
    pub async fn parse_with_skills(&self, input: DocumentInput) -> Result<CandidateRecord, ParseError> {
        let parser = self.clone();
        let text: Arc<str> =
            tokio::task::spawn_blocking(move || parser.read_text(&input)).await??.into();

        let core = {
            let parser = self.clone();
            let text = text.clone();
            tokio::task::spawn_blocking(move || parser.extract(&text))
        };
        let skills = async {
            match &self.skills {
                Some(extractor) => Some(extractor.extract(&text).await),
                None => None,
            }
        };

        let (core, skills) = tokio::join!(core, skills);
        let mut record = core?;
        record.skills = skills;

        info!(
            "Parsed résumé: name_found={}, experience={}, degrees={}, skills={}",
            !record.first_name.is_empty(),
            record.total_experience,
            record.education.degrees.len(),
            record.skills.as_ref().map_or(0, |s| s.len())
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::dates::DateIntervalParser;
    use crate::extraction::experience::RoundingPolicy;
    use crate::extraction::GazetteerSkillSource;
    use crate::extraction::RuleBasedRecognizer;
    use chrono::NaiveDate;
    use std::io::Write;

    const RESUME: &str = "\
JOHN SMITH
john.smith@mail.com | +91 987-654-3210
Bengaluru, India

PROFESSIONAL EXPERIENCE
Backend Engineer, Globex            Mar 2022 - Present
Software Engineer, Initech          Jan 2019 - Feb 2022

EDUCATION
B.Tech in Computer Science, IIT Bombay    2014 - 2018

SKILLS
Python, SQL, Docker";

    fn majors() -> Arc<Gazetteer> {
        Arc::new(Gazetteer::from_terms(["Computer Science", "Physics"]))
    }

    fn parser() -> ResumeParser {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        ResumeParser::new(majors()).with_experience(ExperienceCalculator::with_parser(
            DateIntervalParser::with_reference(today),
            RoundingPolicy::Exact,
        ))
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let err = parser().parse(&DocumentInput::default()).unwrap_err();
        assert!(matches!(err, ParseError::MissingInput));
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let err = parser()
            .parse(&DocumentInput::from_path("/nonexistent/cv.pdf"))
            .unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }

    #[test]
    fn test_full_record_from_text_bytes() {
        let record = parser()
            .parse(&DocumentInput::from_bytes(RESUME.as_bytes().to_vec()))
            .unwrap();

        assert_eq!(record.first_name, "John");
        assert_eq!(record.last_name, "Smith");
        assert_eq!(record.email, "john.smith@mail.com");
        assert_eq!(record.phone.as_deref(), Some("+91 987-654-3210"));
        assert_eq!(record.total_experience, "5 years 4 months");
        assert!(record.education.degrees.contains("B.Tech"));
        assert!(record.education.institutions.contains("IIT Bombay"));
        assert!(record.education.majors.contains("Computer Science"));
        assert_eq!(record.skills, None);
    }

    #[test]
    fn test_bytes_take_precedence_over_path() {
        let input = DocumentInput {
            path: Some("/nonexistent/cv.pdf".into()),
            bytes: Some(Bytes::from_static(b"Jane Doe")),
            kind: None,
        };
        let record = parser().parse(&input).unwrap();
        assert_eq!(record.first_name, "Jane");
    }

    #[test]
    fn test_reads_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{RESUME}").unwrap();
        let record = parser().parse(&DocumentInput::from_path(file.path())).unwrap();
        assert_eq!(record.email, "john.smith@mail.com");
    }

    #[test]
    fn test_empty_document_yields_empty_record() {
        let record = parser().extract("");
        assert_eq!(record.first_name, "");
        assert_eq!(record.email, "");
        assert_eq!(record.phone, None);
        assert_eq!(record.total_experience, "0 months");
        assert!(record.education.is_empty());
    }

    #[test]
    fn test_unsupported_bytes_fail_text_extraction() {
        let err = parser()
            .parse(&DocumentInput::from_bytes(vec![0xff, 0xfe, 0xfd]))
            .unwrap_err();
        assert!(matches!(err, ParseError::TextExtraction(_)));
    }

    #[test]
    fn test_declared_kind_overrides_sniffing() {
        let input = DocumentInput::from_bytes(b"%PDF-1.4\nJane Doe".to_vec())
            .with_kind(DocumentKind::PlainText);
        let record = parser().parse(&input).unwrap();
        assert_eq!(record.first_name, "Jane");
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let p = parser().with_ner(Arc::new(RuleBasedRecognizer::new()));
        assert_eq!(p.extract(RESUME), p.extract(RESUME));
    }

    #[tokio::test]
    async fn test_parse_with_skills_runs_ensemble() {
        let skills = SkillExtractor::default().with_source(Arc::new(GazetteerSkillSource::new(
            &Gazetteer::from_terms(["Python", "Docker", "Kotlin"]),
        )));
        let record = parser()
            .with_skills(skills)
            .parse_with_skills(DocumentInput::from_bytes(RESUME.as_bytes().to_vec()))
            .await
            .unwrap();

        assert_eq!(record.first_name, "John");
        let skills: Vec<_> = record.skills.unwrap().into_iter().collect();
        assert_eq!(skills, vec!["Docker", "Python"]);
    }

    #[tokio::test]
    async fn test_parse_with_skills_without_extractor() {
        let record = parser()
            .parse_with_skills(DocumentInput::from_bytes(RESUME.as_bytes().to_vec()))
            .await
            .unwrap();
        assert_eq!(record.skills, None);
    }

    #[tokio::test]
    async fn test_parse_with_skills_missing_input() {
        let err = parser()
            .parse_with_skills(DocumentInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ParseError::MissingInput));
    }
}
