//! Human-name splitting: title, first, middle, last and suffix pieces.

use crate::extraction::normalize::title_case;

const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "miss", "mx", "dr", "prof", "professor", "sir", "madam", "er", "eng",
    "shri", "smt", "sri", "capt", "col", "rev",
];

const SUFFIXES: &[&str] = &[
    "jr", "sr", "ii", "iii", "iv", "v", "phd", "md", "mba", "esq", "cpa", "pe",
];

/// Particles that belong to the last name (`van Dyke`, `de la Cruz`).
const LAST_NAME_PREFIXES: &[&str] = &[
    "van", "von", "der", "den", "de", "del", "della", "da", "di", "du", "la", "le", "bin", "binti",
    "al", "el", "st",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HumanName {
    pub title: String,
    pub first: String,
    pub middle: String,
    pub last: String,
    pub suffix: String,
}

impl HumanName {
    /// Splits `raw` into name pieces. Accepts `First Middle Last` and
    /// `Last, First Middle` forms; all-caps or all-lowercase input is
    /// re-capitalised.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let recapitalise = needs_capitalisation(raw);

        let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
        let (mut tokens, mut suffixes) = match parts.as_slice() {
            [single] => (tokenize(single), Vec::new()),
            [head, rest @ ..] if rest.iter().all(|p| is_suffix_list(p)) => (
                tokenize(head),
                rest.iter().flat_map(|p| tokenize(p)).collect(),
            ),
            [last, first, rest @ ..] => {
                let mut tokens = tokenize(first);
                tokens.extend(tokenize(last));
                (tokens, rest.iter().flat_map(|p| tokenize(p)).collect())
            }
            [] => (Vec::new(), Vec::new()),
        };

        let mut titles = Vec::new();
        while tokens.len() > 1 && is_title(tokens[0]) {
            titles.push(tokens.remove(0));
        }

        let mut trailing = Vec::new();
        while tokens.len() > 1 && tokens.last().is_some_and(|t| is_suffix(t)) {
            if let Some(t) = tokens.pop() {
                trailing.insert(0, t);
            }
        }
        suffixes.extend(trailing);

        let mut name = HumanName {
            title: titles.join(" "),
            suffix: suffixes.join(" "),
            ..Default::default()
        };

        match tokens.len() {
            0 => {}
            1 => name.first = tokens[0].to_string(),
            n => {
                let mut last_start = n - 1;
                while last_start > 1 && is_last_name_prefix(tokens[last_start - 1]) {
                    last_start -= 1;
                }
                name.first = tokens[0].to_string();
                name.middle = tokens[1..last_start].join(" ");
                name.last = tokens[last_start..].join(" ");
            }
        }

        if recapitalise {
            name.capitalise();
        }
        name
    }

    pub fn has_first_and_last(&self) -> bool {
        !self.first.is_empty() && !self.last.is_empty()
    }

    fn capitalise(&mut self) {
        self.title = title_case(&self.title);
        self.first = title_case(&self.first);
        self.middle = title_case(&self.middle);
        self.last = self
            .last
            .split(' ')
            .map(|piece| {
                if is_last_name_prefix(piece) {
                    piece.to_lowercase()
                } else {
                    title_case(piece)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        // suffixes such as "III" or "PhD" keep their original casing
    }
}

/// Splits on whitespace, dropping pieces that carry no letters at all
/// (`|`, `–`, bullets).
fn tokenize(s: &str) -> Vec<&str> {
    s.split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric() && c != '.'))
        .filter(|t| t.chars().any(char::is_alphabetic))
        .collect()
}

fn bare(token: &str) -> String {
    token.trim_end_matches('.').replace('.', "").to_lowercase()
}

fn is_title(token: &str) -> bool {
    TITLES.contains(&bare(token).as_str())
}

fn is_suffix(token: &str) -> bool {
    SUFFIXES.contains(&bare(token).as_str())
}

fn is_suffix_list(part: &str) -> bool {
    let tokens = tokenize(part);
    !tokens.is_empty() && tokens.iter().all(|t| is_suffix(t))
}

fn is_last_name_prefix(token: &str) -> bool {
    LAST_NAME_PREFIXES.contains(&token.to_lowercase().as_str())
}

/// Mixed-case input is trusted as written; only all-upper or all-lower
/// input gets re-capitalised.
fn needs_capitalisation(s: &str) -> bool {
    let letters: Vec<char> = s.chars().filter(|c| c.is_alphabetic()).collect();
    !letters.is_empty()
        && (letters.iter().all(|c| c.is_uppercase()) || letters.iter().all(|c| c.is_lowercase()))
}
