//! Term gazetteers (majors, skills) loaded from single-column CSV files.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::info;

const BUNDLED_MAJORS: &str = include_str!("../../data/majors.csv");
const BUNDLED_SKILLS: &str = include_str!("../../data/skills.csv");

#[derive(Debug, Error)]
pub enum GazetteerError {
    #[error("failed to open gazetteer {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed gazetteer CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// A set of lower-cased reference terms. The first CSV row is a header and
/// only the first column of each remaining row is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gazetteer {
    terms: BTreeSet<String>,
}

impl Gazetteer {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, GazetteerError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut terms = BTreeSet::new();
        for record in csv.records() {
            let record = record?;
            if let Some(term) = record.get(0) {
                let term = term.trim().to_lowercase();
                if !term.is_empty() {
                    terms.insert(term);
                }
            }
        }
        Ok(Self { terms })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GazetteerError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| GazetteerError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let gazetteer = Self::from_reader(file)?;
        info!(
            "Loaded {} gazetteer terms from {}",
            gazetteer.len(),
            path.display()
        );
        Ok(gazetteer)
    }

    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn bundled_majors() -> Result<Self, GazetteerError> {
        Self::from_reader(BUNDLED_MAJORS.as_bytes())
    }

    pub fn bundled_skills() -> Result<Self, GazetteerError> {
        Self::from_reader(BUNDLED_SKILLS.as_bytes())
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(&term.trim().to_lowercase())
    }

    /// Terms in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_header_row_is_skipped() {
        let g = Gazetteer::from_reader("Major\nComputer Science\nPhysics\n".as_bytes()).unwrap();
        assert_eq!(g.len(), 2);
        assert!(!g.contains("major"));
        assert!(g.contains("computer science"));
    }

    #[test]
    fn test_terms_are_lowercased_and_deduplicated() {
        let g = Gazetteer::from_reader("Skill\nRust\nRUST\n  rust \n".as_bytes()).unwrap();
        assert_eq!(g.iter().collect::<Vec<_>>(), vec!["rust"]);
    }

    #[test]
    fn test_only_first_column_and_blank_rows() {
        let g = Gazetteer::from_reader("Skill,Level\nPython,expert\n\nSQL\n".as_bytes()).unwrap();
        assert_eq!(g.iter().collect::<Vec<_>>(), vec!["python", "sql"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Major\nMathematics\nEconomics").unwrap();
        let g = Gazetteer::load(file.path()).unwrap();
        assert!(g.contains("Economics"));
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Gazetteer::load("/nonexistent/majors.csv").unwrap_err();
        assert!(matches!(err, GazetteerError::Io { .. }));
    }

    #[test]
    fn test_bundled_lists_are_populated() {
        let majors = Gazetteer::bundled_majors().unwrap();
        let skills = Gazetteer::bundled_skills().unwrap();
        assert!(majors.contains("computer science"));
        assert!(skills.contains("python"));
        assert!(!skills.contains("skill"));
    }
}
