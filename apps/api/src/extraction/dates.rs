//! Date-interval extraction for employment history.
//!
//! Pattern families are tried in a fixed priority order. Each match is
//! fuzzy-parsed on both sides; an end side of "present" / "current" / "now"
//! resolves to the reference date. Intervals are deduplicated on their end
//! date: the first interval (by pattern priority, then document order) to
//! claim a calendar day keeps it.

use std::collections::HashSet;

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";
const OPEN_END: &str = r"(?:present|current|now)";
const SEP: &str = r"\s*(?:–|—|-|to)\s*";

static OPEN_END_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)present|current|now").unwrap());

/// (pattern, description) in priority order.
static RANGE_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    let build = |body: String| Regex::new(&format!("(?i){body}")).unwrap();
    vec![
        // Jan 2020 – Feb 2023, January 2020 to Present, Sept. 2019 - now
        (
            build(format!(
                r"\b({MONTH}\.?\s+\d{{4}}){SEP}({MONTH}\.?\s+\d{{4}}|{OPEN_END})\b"
            )),
            "month-year",
        ),
        // Jan 20 – Feb 23
        (
            build(format!(
                r"\b({MONTH}\.?\s+\d{{2}}){SEP}({MONTH}\.?\s+\d{{2}}|{OPEN_END})\b"
            )),
            "month-short-year",
        ),
        // 01/2020 – 03/2023
        (
            build(format!(
                r"\b(\d{{1,2}}/\d{{4}}){SEP}(\d{{1,2}}/\d{{4}}|{OPEN_END})\b"
            )),
            "numeric-month-year",
        ),
        // 2020 – 2023
        (
            build(format!(r"\b(\d{{4}}){SEP}(\d{{4}}|{OPEN_END})\b")),
            "year",
        ),
        // 2020-01 to 2023-03
        (
            build(format!(
                r"\b(\d{{4}}-\d{{2}}){SEP}(\d{{4}}-\d{{2}}|{OPEN_END})\b"
            )),
            "iso-month",
        ),
        // Jan 2024 -- current
        (
            build(format!(
                r"\b({MONTH}\.?\s+\d{{4}})\s*[-–—to]+\s*({OPEN_END})\b"
            )),
            "open-ended",
        ),
    ]
});

/// One employment period. `end` is the reference date when the source said
/// "present"; it is not guaranteed to be after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub open_ended: bool,
}

impl DateInterval {
    /// Whole calendar months between start and end. Negative for reversed ranges.
    pub fn months(&self) -> i32 {
        (self.end.year() - self.start.year()) * 12
            + (self.end.month() as i32 - self.start.month() as i32)
    }
}

/// Extracts date ranges relative to a reference date ("today").
///
/// Without a pinned reference the local date is read on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateIntervalParser {
    reference: Option<NaiveDate>,
}

impl DateIntervalParser {
    pub fn new() -> Self {
        Self { reference: None }
    }

    /// Pins `today` for open-ended ranges and for missing date components.
    pub fn with_reference(today: NaiveDate) -> Self {
        Self {
            reference: Some(today),
        }
    }

    /// The pinned reference date, or the current local date.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn extract(&self, text: &str) -> Vec<DateInterval> {
        self.extract_at(text, self.reference_date())
    }

    /// Extracts ranges with `today` as the extraction timestamp.
    pub fn extract_at(&self, text: &str, today: NaiveDate) -> Vec<DateInterval> {
        let mut seen_ends = HashSet::new();
        let mut intervals = Vec::new();

        for (pattern, family) in RANGE_PATTERNS.iter() {
            for caps in pattern.captures_iter(text) {
                let (Some(start), Some(end)) = (caps.get(1), caps.get(2)) else {
                    continue;
                };
                let Some(interval) = parse_interval(start.as_str(), end.as_str(), today) else {
                    debug!(
                        "Discarding unparseable {family} range '{}'",
                        caps.get(0).map_or("", |m| m.as_str())
                    );
                    continue;
                };
                if seen_ends.insert(interval.end) {
                    intervals.push(interval);
                }
            }
        }

        intervals
    }

    /// Lenient single-date parser: month names, four-digit years, two-digit
    /// years (only next to a month name), numeric months and days. Unknown
    /// words are skipped. Missing month or day come from the reference date.
    pub fn parse_fuzzy(&self, raw: &str) -> Option<NaiveDate> {
        parse_fuzzy_at(raw, self.reference_date())
    }
}

fn parse_interval(start: &str, end: &str, today: NaiveDate) -> Option<DateInterval> {
    let start = parse_fuzzy_at(start, today)?;
    let open_ended = OPEN_END_WORD.is_match(end);
    let end = if open_ended {
        today
    } else {
        parse_fuzzy_at(end, today)?
    };
    Some(DateInterval {
        start,
        end,
        open_ended,
    })
}

fn parse_fuzzy_at(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    let mut year: Option<i32> = None;
    let mut month: Option<u32> = None;
    let mut day: Option<u32> = None;
    let mut small_numbers: Vec<u32> = Vec::new();

    for token in raw
        .split(|c: char| c.is_whitespace() || matches!(c, '/' | '-' | '.' | ','))
        .filter(|t| !t.is_empty())
    {
        if let Some(m) = month_from_name(token) {
            month.get_or_insert(m);
        } else if token.chars().all(|c| c.is_ascii_digit()) {
            let value: u32 = token.parse().ok()?;
            if token.len() == 4 && year.is_none() {
                year = Some(value as i32);
            } else if token.len() <= 2 {
                small_numbers.push(value);
            }
        }
    }

    let named_month = month.is_some();
    for value in small_numbers {
        if named_month && year.is_none() {
            year = Some(resolve_two_digit_year(value, today));
        } else if month.is_none() && (1..=12).contains(&value) {
            month = Some(value);
        } else if day.is_none() && (1..=31).contains(&value) {
            day = Some(value);
        }
    }

    let year = year?;
    let month = month.unwrap_or(today.month());
    let day = match day {
        Some(day) => day,
        None => today.day().min(days_in_month(year, month)?),
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Places a two-digit year in the century that keeps it within 50 years
/// of the reference year.
fn resolve_two_digit_year(yy: u32, today: NaiveDate) -> i32 {
    let this_year = today.year();
    let mut year = this_year - this_year % 100 + yy as i32;
    if year >= this_year + 50 {
        year -= 100;
    } else if year < this_year - 50 {
        year += 100;
    }
    year
}

/// Convenience wrapper using today's date as the reference.
pub fn extract_date_ranges(text: &str) -> Vec<DateInterval> {
    DateIntervalParser::new().extract(text)
}

fn month_from_name(token: &str) -> Option<u32> {
    let lower = token.to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    const NAMES: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    NAMES
        .iter()
        .position(|name| name.starts_with(&lower))
        .map(|i| i as u32 + 1)
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}
