//! Small string normalisers shared by the extractors.

/// Collapses every run of whitespace into a single space and trims the ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Upper-cases the first letter of every word and lower-cases the rest.
/// A "word" restarts after any non-alphabetic character, so `node.js`
/// becomes `Node.Js` and `mary-jane` becomes `Mary-Jane`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = !(c == '\'' && !at_word_start);
        }
    }
    out
}

/// Cleans an opaque skill string coming from a gazetteer, NER or LLM:
/// keeps alphanumerics, spaces, `+`, `.`, `-` (and `#`, for C#), collapses
/// whitespace and title-cases the result.
pub fn clean_skill(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '+' | '.' | '-' | '#') {
                c
            } else {
                ' '
            }
        })
        .collect();
    title_case(&collapse_whitespace(&kept))
}
