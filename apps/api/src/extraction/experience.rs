//! Total work experience: the summed month spans of every date range found
//! in the employment-history section.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;

use crate::extraction::dates::DateIntervalParser;
use crate::extraction::section::SectionLocator;

const EXPERIENCE_HEADINGS: &[&str] = &[
    "experience",
    "employment",
    "work history",
    "professional background",
    "work experience",
    "career history",
    "career summary",
    "job history",
    "employment history",
    "professional experience",
    "job experience",
    "work summary",
    "career experience",
    "career details",
    "job details",
    "job summary",
    "employment details",
    "work details",
    "career overview",
    "job overview",
    "employment overview",
];

const EXPERIENCE_STOP_HEADINGS: &[&str] = &[
    "education",
    "projects",
    "skills",
    "certifications",
    "languages",
    "summary",
    "objective",
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
];

static EXPERIENCE_SECTION: Lazy<SectionLocator> =
    Lazy::new(|| SectionLocator::new(EXPERIENCE_HEADINGS, EXPERIENCE_STOP_HEADINGS));

/// How the summed month count is turned into the reported figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoundingPolicy {
    /// Report the summed months as computed.
    #[default]
    Exact,
    /// Count the first month of employment as well: adds one month whenever
    /// at least one range contributed.
    InclusiveMonth,
}

impl FromStr for RoundingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(RoundingPolicy::Exact),
            "inclusive" | "inclusive_month" | "inclusive-month" => {
                Ok(RoundingPolicy::InclusiveMonth)
            }
            other => Err(format!(
                "unknown experience rounding policy '{other}' (expected 'exact' or 'inclusive')"
            )),
        }
    }
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingPolicy::Exact => f.write_str("exact"),
            RoundingPolicy::InclusiveMonth => f.write_str("inclusive"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExperienceCalculator {
    dates: DateIntervalParser,
    policy: RoundingPolicy,
}

impl ExperienceCalculator {
    pub fn new(policy: RoundingPolicy) -> Self {
        Self {
            dates: DateIntervalParser::new(),
            policy,
        }
    }

    pub fn with_parser(dates: DateIntervalParser, policy: RoundingPolicy) -> Self {
        Self { dates, policy }
    }

    /// Text of the employment-history section (heading included), or an
    /// empty string when the résumé has none.
    pub fn experience_section(text: &str) -> String {
        let lines: Vec<&str> = text.lines().collect();
        EXPERIENCE_SECTION
            .find(&lines)
            .map(|section| section.text())
            .unwrap_or_default()
    }

    /// Sum of positive month spans in the employment section.
    /// Reversed or zero-length ranges contribute nothing.
    pub fn total_months(&self, text: &str) -> u32 {
        self.total_months_at(text, self.dates.reference_date())
    }

    /// `total_months` with `today` as the extraction timestamp.
    pub fn total_months_at(&self, text: &str, today: NaiveDate) -> u32 {
        let section = Self::experience_section(text);
        let mut total: u32 = 0;
        let mut contributed = false;

        for interval in self.dates.extract_at(&section, today) {
            let months = interval.months();
            if months > 0 {
                total += months as u32;
                contributed = true;
            }
        }

        if contributed && self.policy == RoundingPolicy::InclusiveMonth {
            total += 1;
        }
        total
    }

    pub fn total_experience(&self, text: &str) -> String {
        format_months(self.total_months(text))
    }
}

/// Renders a month count as `"N year(s) M month(s)"`, omitting zero parts.
pub fn format_months(total_months: u32) -> String {
    let years = total_months / 12;
    let months = total_months % 12;

    let mut parts = Vec::new();
    if years > 0 {
        parts.push(format!("{years} year{}", if years > 1 { "s" } else { "" }));
    }
    if months > 0 {
        parts.push(format!("{months} month{}", if months > 1 { "s" } else { "" }));
    }

    if parts.is_empty() {
        "0 months".to_string()
    } else {
        parts.join(" ")
    }
}
