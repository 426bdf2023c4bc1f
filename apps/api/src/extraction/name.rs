//! Candidate name from the top of the document.
//!
//! The first ten non-blank lines are tried one by one as a human name,
//! skipping contact lines and document titles. When none yields both a first
//! and a last name, the entity recogniser (if any) is asked for people in the
//! same ten lines.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::extraction::human_name::HumanName;
use crate::extraction::ner::{EntityLabel, EntityRecognizer};

const HEAD_LINES: usize = 10;

static NOT_A_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[\d@]|\b(?:curriculum|r[eé]sum[eé]|cv)\b").unwrap());

/// Returns `(first, last)`, or a pair of empty strings when no name is found.
pub fn extract_name(text: &str, ner: Option<&dyn EntityRecognizer>) -> (String, String) {
    let head: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(HEAD_LINES)
        .collect();

    for line in &head {
        if NOT_A_NAME.is_match(line) {
            continue;
        }
        let name = HumanName::parse(line);
        if name.has_first_and_last() {
            return (name.first, name.last);
        }
    }

    let Some(ner) = ner else {
        return (String::new(), String::new());
    };

    debug!("No name line in document head, trying '{}'", ner.name());
    match ner.entities(&head.join("\n")) {
        Ok(entities) => entities
            .into_iter()
            .filter(|e| e.label == EntityLabel::Person)
            .map(|e| HumanName::parse(&e.text))
            .find(HumanName::has_first_and_last)
            .map(|name| (name.first, name.last))
            .unwrap_or_default(),
        Err(e) => {
            warn!("Entity recognizer '{}' failed during name extraction: {}", ner.name(), e);
            (String::new(), String::new())
        }
    }
}
