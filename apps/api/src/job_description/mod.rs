//! Job-description extraction: free text in, `JobDescription` out.
//! Any model failure yields the manual-review placeholder instead of an error.

pub mod handlers;

use tracing::{info, warn};

use crate::llm_client::prompts::{JOB_DESCRIPTION_PROMPT_TEMPLATE, JSON_ONLY_SYSTEM};
use crate::llm_client::JsonLlm;
use crate::models::JobDescription;

pub async fn parse_job_description(text: &str, llm: &dyn JsonLlm) -> JobDescription {
    let prompt = JOB_DESCRIPTION_PROMPT_TEMPLATE.replace("{job_text}", text);

    let value = match llm.complete_json(&prompt, JSON_ONLY_SYSTEM).await {
        Ok(value) => value,
        Err(e) => {
            warn!("Job description extraction failed: {e}");
            return JobDescription::manual_review();
        }
    };

    match serde_json::from_value::<JobDescription>(value) {
        Ok(jd) => {
            info!(
                "Extracted job description '{}' ({} technical skills)",
                jd.job_title,
                jd.technical_skills.len()
            );
            jd
        }
        Err(e) => {
            warn!("Job description reply did not match schema: {e}");
            JobDescription::manual_review()
        }
    }
}
