use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const UNSPECIFIED_TITLE: &str = "Not specified";
pub const MANUAL_REVIEW_TITLE: &str = "Manual Review Required";

/// Structured job description as returned by the extraction model.
///
/// Deserialization is lenient: `null` and missing fields take their defaults,
/// a bare string is accepted where a list is expected, and numbers are
/// accepted where a string is expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDescription {
    #[serde(default = "default_job_title", deserialize_with = "job_title")]
    pub job_title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub job_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub experience_required: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub education_level: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub technical_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub soft_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub responsibilities: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub salary_range: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub benefits: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company_size: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub industry: Option<String>,
}

impl Default for JobDescription {
    fn default() -> Self {
        Self {
            job_title: default_job_title(),
            company_name: None,
            location: None,
            job_type: None,
            experience_required: None,
            education_level: None,
            technical_skills: Vec::new(),
            soft_skills: Vec::new(),
            responsibilities: Vec::new(),
            salary_range: None,
            benefits: Vec::new(),
            company_size: None,
            industry: None,
        }
    }
}

impl JobDescription {
    /// Placeholder returned when extraction fails, flagging the document for
    /// a human to read.
    pub fn manual_review() -> Self {
        Self {
            job_title: MANUAL_REVIEW_TITLE.to_string(),
            company_name: Some("Check document manually".to_string()),
            technical_skills: vec!["Review needed".to_string()],
            responsibilities: vec!["Check original document".to_string()],
            ..Default::default()
        }
    }

    pub fn needs_manual_review(&self) -> bool {
        self.job_title == MANUAL_REVIEW_TITLE
    }
}

fn default_job_title() -> String {
    UNSPECIFIED_TITLE.to_string()
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar_to_string))
}

fn job_title<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_else(default_job_title))
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items.into_iter().filter_map(scalar_to_string).collect(),
        Some(other) => scalar_to_string(other).into_iter().collect(),
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payload_deserializes() {
        let json = r#"{
            "job_title": "Senior Rust Engineer",
            "company_name": "Acme",
            "location": "Remote",
            "job_type": "full-time",
            "experience_required": "5+ years",
            "education_level": "B.Tech or equivalent",
            "technical_skills": ["Rust", "Kubernetes"],
            "soft_skills": ["Communication"],
            "responsibilities": ["Own the ingest pipeline"],
            "salary_range": "$150k-$180k",
            "benefits": ["Health insurance", "Stock options"],
            "company_size": "200-500",
            "industry": "Fintech"
        }"#;
        let jd: JobDescription = serde_json::from_str(json).unwrap();
        assert_eq!(jd.job_title, "Senior Rust Engineer");
        assert_eq!(jd.technical_skills, vec!["Rust", "Kubernetes"]);
        assert_eq!(jd.benefits.len(), 2);
        assert_eq!(jd.industry.as_deref(), Some("Fintech"));
    }

    #[test]
    fn test_missing_and_null_fields_take_defaults() {
        let jd: JobDescription =
            serde_json::from_str(r#"{"job_title": null, "technical_skills": null}"#).unwrap();
        assert_eq!(jd, JobDescription::default());
        assert_eq!(jd.job_title, UNSPECIFIED_TITLE);
    }

    #[test]
    fn test_string_accepted_for_list_fields() {
        let jd: JobDescription =
            serde_json::from_str(r#"{"benefits": "Health insurance", "soft_skills": ""}"#).unwrap();
        assert_eq!(jd.benefits, vec!["Health insurance"]);
        assert!(jd.soft_skills.is_empty());
    }

    #[test]
    fn test_numbers_accepted_for_string_fields() {
        let jd: JobDescription =
            serde_json::from_str(r#"{"experience_required": 3, "company_size": "  "}"#).unwrap();
        assert_eq!(jd.experience_required.as_deref(), Some("3"));
        assert_eq!(jd.company_size, None);
    }

    #[test]
    fn test_manual_review_placeholder() {
        let jd = JobDescription::manual_review();
        assert!(jd.needs_manual_review());
        assert_eq!(jd.technical_skills, vec!["Review needed"]);
        assert!(!JobDescription::default().needs_manual_review());
    }
}
