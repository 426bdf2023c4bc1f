//! Contact details: first email address and first phone number in a document.

use once_cell::sync::Lazy;
use regex::Regex;

// local@domain.tld, with an optional second-level suffix such as `.co.in`
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}(?:\.[a-zA-Z]{2,})?").unwrap()
});

// Optional +CC country code, optional (area) code, then 3-3-4 digit groups.
static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}[-.\s]?|\b\d{1,3}[-.\s]?)?(?:\(\d{3}\)|\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b")
        .unwrap()
});

/// Returns the first email address in `text`, or an empty string.
pub fn extract_email(text: &str) -> String {
    EMAIL
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Returns the first phone-number-shaped run of digits in `text`.
/// No attempt is made to validate that the number exists.
pub fn extract_phone(text: &str) -> Option<String> {
    PHONE.find(text).map(|m| m.as_str().to_string())
}
