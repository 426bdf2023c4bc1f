use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::extraction::EducationRecord;

/// Structured output of résumé extraction. Fields that could not be
/// determined are empty rather than missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub total_experience: String,
    #[serde(flatten)]
    pub education: EducationRecord,
    /// Absent when no skill extraction was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<BTreeSet<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_flat_education_and_omits_skills() {
        let mut record = CandidateRecord {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@doe.dev".to_string(),
            phone: None,
            total_experience: "0 months".to_string(),
            ..Default::default()
        };
        record.education.degrees.insert("MBA".to_string());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "first_name": "Jane",
                "last_name": "Doe",
                "email": "jane@doe.dev",
                "phone": null,
                "total_experience": "0 months",
                "degrees": ["MBA"],
                "institutions": [],
                "majors": []
            })
        );
    }

    #[test]
    fn test_skills_serialized_when_present() {
        let record = CandidateRecord {
            skills: Some(["Rust".to_string()].into_iter().collect()),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["skills"], json!(["Rust"]));
    }
}
