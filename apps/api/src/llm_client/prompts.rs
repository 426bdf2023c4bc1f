// Shared prompt constants. Each feature that calls the LLM keeps its own
// templates here so the wording lives in one place.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Skill extraction from résumé text. `{resume_text}` is substituted.
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Extract the professional skills (programming languages, frameworks, tools, platforms, methodologies and domain skills) mentioned in the résumé below.

Rules:
- List only skills explicitly present in the text.
- One skill per array element, without proficiency levels or years.
- If no skills are present, return an empty array.

Respond with exactly this JSON shape:
{"skills": ["skill one", "skill two"]}

RÉSUMÉ TEXT:
{resume_text}"#;

/// Job-description extraction. `{job_text}` is substituted.
pub const JOB_DESCRIPTION_PROMPT_TEMPLATE: &str = r#"You are an expert job description analyzer. Extract information and respond ONLY with valid JSON.

CRITICAL REQUIREMENTS:
- Respond with a valid JSON object following the exact schema below
- Extract ONLY information explicitly mentioned in the job description
- If information is missing, use null for strings or [] for arrays

JSON SCHEMA REQUIRED:
{
    "job_title": "string (job title/position name)",
    "company_name": "string or null (company name)",
    "location": "string or null (job location)",
    "job_type": "string or null (full-time/part-time/contract)",
    "experience_required": "string or null (years of experience)",
    "education_level": "string or null (degree requirements)",
    "technical_skills": ["array of technical skills"],
    "soft_skills": ["array of soft skills"],
    "responsibilities": ["array of job duties"],
    "salary_range": "string or null (salary info)",
    "benefits": ["array of benefits"],
    "company_size": "string or null (company size)",
    "industry": "string or null (industry/domain)"
}

JOB DESCRIPTION TEXT:
{job_text}"#;
