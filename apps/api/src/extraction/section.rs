//! Section locator: finds the bounded run of lines under a recognised heading.
//!
//! A heading must be short, unpunctuated, start with one of the section keywords
//! and look like a heading (ALL CAPS, Title Case, or at least a leading capital).

use regex::Regex;

/// Maximum number of words a heading line may contain.
const MAX_HEADING_WORDS: usize = 5;

/// Characters that disqualify a line from being a heading.
const HEADING_PUNCTUATION: &[char] = &[':', '.', '-', '•', '(', ')'];

/// A compiled set of heading keywords, matched case-insensitively as a
/// whole line or as a word-bounded prefix of the line.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    pattern: Regex,
}

impl KeywordSet {
    pub fn new(keywords: &[&str]) -> Self {
        let alternation = keywords
            .iter()
            .map(|kw| regex::escape(kw.trim()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"(?i)^(?:{alternation})\b"))
            .expect("escaped keyword alternation is a valid regex");
        Self { pattern }
    }

    fn matches_prefix(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }
}

/// A contiguous run of document lines: the heading line at `heading` and
/// everything up to (not including) `end`.
///
/// Always satisfies `end > heading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    lines: &'a [&'a str],
    heading: usize,
    end: usize,
}

impl<'a> Section<'a> {
    pub fn heading_index(&self) -> usize {
        self.heading
    }

    pub fn end_index(&self) -> usize {
        self.end
    }

    pub fn heading_line(&self) -> &'a str {
        self.lines[self.heading]
    }

    /// Lines after the heading, up to the section end.
    pub fn body(&self) -> &'a [&'a str] {
        &self.lines[self.heading + 1..self.end]
    }

    /// Heading plus body, newline-joined.
    pub fn text(&self) -> String {
        self.lines[self.heading..self.end].join("\n")
    }

    /// Body lines trimmed and newline-joined, heading excluded.
    pub fn body_text(&self) -> String {
        self.body()
            .iter()
            .map(|l| l.trim())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A start/stop keyword pair describing one logical section of a résumé.
#[derive(Debug, Clone)]
pub struct SectionLocator {
    start: KeywordSet,
    stop: KeywordSet,
}

impl SectionLocator {
    pub fn new(start_keywords: &[&str], stop_keywords: &[&str]) -> Self {
        Self {
            start: KeywordSet::new(start_keywords),
            stop: KeywordSet::new(stop_keywords),
        }
    }

    pub fn find<'a>(&self, lines: &'a [&'a str]) -> Option<Section<'a>> {
        find_section(lines, &self.start, &self.stop)
    }
}

/// Returns true when `line` looks like a section heading for one of `keywords`.
pub fn is_heading(line: &str, keywords: &KeywordSet) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return false;
    }

    let is_short = line.split_whitespace().count() <= MAX_HEADING_WORDS;
    let no_punct = !line.contains(HEADING_PUNCTUATION);
    let is_formatted = is_all_upper(line)
        || is_title_case(line)
        || line.chars().next().is_some_and(char::is_uppercase);

    is_short && no_punct && is_formatted && keywords.matches_prefix(line)
}

/// Locates the first section opened by a `start` heading and closed by the
/// next `stop` heading (or the end of the document).
///
/// Stop headings before the opening heading are never considered.
pub fn find_section<'a>(
    lines: &'a [&'a str],
    start: &KeywordSet,
    stop: &KeywordSet,
) -> Option<Section<'a>> {
    let heading = lines.iter().position(|l| is_heading(l, start))?;
    let end = lines[heading + 1..]
        .iter()
        .position(|l| is_heading(l, stop))
        .map(|offset| heading + 1 + offset)
        .unwrap_or(lines.len());

    Some(Section {
        lines,
        heading,
        end,
    })
}

/// At least one cased character, and no lowercase ones.
fn is_all_upper(s: &str) -> bool {
    let mut has_cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Uppercase letters only start words, lowercase letters only continue them.
fn is_title_case(s: &str) -> bool {
    let mut has_cased = false;
    let mut prev_cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            has_cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            has_cased = true;
        } else {
            prev_cased = false;
        }
    }
    has_cased
}

#[cfg(test)]
mod tests {
    use super::*;

    fn education() -> KeywordSet {
        KeywordSet::new(&["education", "academic background"])
    }

    #[test]
    fn test_heading_all_caps() {
        assert!(is_heading("EDUCATION", &education()));
    }

    #[test]
    fn test_heading_title_case_prefix() {
        assert!(is_heading("Education And Training", &education()));
    }

    #[test]
    fn test_heading_multiword_keyword() {
        assert!(is_heading("  Academic Background  ", &education()));
    }

    #[test]
    fn test_heading_rejects_punctuation() {
        assert!(!is_heading("Education:", &education()));
        assert!(!is_heading("Education (2016)", &education()));
        assert!(!is_heading("• Education", &education()));
    }

    #[test]
    fn test_heading_rejects_long_lines() {
        assert!(!is_heading(
            "Education is something I value a lot",
            &education()
        ));
    }

    #[test]
    fn test_heading_rejects_lowercase_start() {
        assert!(!is_heading("education", &education()));
    }

    #[test]
    fn test_heading_requires_word_boundary() {
        assert!(!is_heading("Educational", &education()));
    }

    #[test]
    fn test_heading_rejects_keyword_not_at_start() {
        assert!(!is_heading("Higher Education", &education()));
    }

    #[test]
    fn test_title_case_detection() {
        assert!(is_title_case("Work History"));
        assert!(!is_title_case("Work history"));
        assert!(!is_title_case("WORK"));
        assert!(is_all_upper("WORK HISTORY 2"));
        assert!(!is_all_upper("123"));
    }

    #[test]
    fn test_find_section_bounds() {
        let lines = vec![
            "Jane Doe",
            "EDUCATION",
            "B.Tech, IIT Delhi",
            "2014 - 2018",
            "SKILLS",
            "Rust",
        ];
        let stop = KeywordSet::new(&["skills"]);
        let section = find_section(&lines, &education(), &stop).unwrap();
        assert_eq!(section.heading_index(), 1);
        assert_eq!(section.end_index(), 4);
        assert_eq!(section.heading_line(), "EDUCATION");
        assert_eq!(section.body(), &["B.Tech, IIT Delhi", "2014 - 2018"]);
        assert_eq!(section.text(), "EDUCATION\nB.Tech, IIT Delhi\n2014 - 2018");
    }

    #[test]
    fn test_find_section_runs_to_end() {
        let lines = vec!["Education", "MSc Physics"];
        let stop = KeywordSet::new(&["skills"]);
        let section = find_section(&lines, &education(), &stop).unwrap();
        assert_eq!(section.end_index(), 2);
        assert_eq!(section.body_text(), "MSc Physics");
    }

    #[test]
    fn test_find_section_absent_without_heading() {
        let lines = vec!["Jane Doe", "jane@example.com", "Skills", "Rust"];
        let stop = KeywordSet::new(&["skills"]);
        assert!(find_section(&lines, &education(), &stop).is_none());
    }

    #[test]
    fn test_stop_heading_before_start_is_ignored() {
        let lines = vec!["Skills", "Rust", "Education", "BSc", "Skills", "Go"];
        let locator = SectionLocator::new(&["education"], &["skills"]);
        let section = locator.find(&lines).unwrap();
        assert_eq!(section.heading_index(), 2);
        assert_eq!(section.end_index(), 4);
    }

    #[test]
    fn test_heading_only_section_has_empty_body() {
        let lines = vec!["Education", "Skills"];
        let locator = SectionLocator::new(&["education"], &["skills"]);
        let section = locator.find(&lines).unwrap();
        assert!(section.end_index() > section.heading_index());
        assert!(section.body().is_empty());
    }
}
