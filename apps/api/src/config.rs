use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::extraction::RoundingPolicy;

const DEFAULT_PORT: &str = "8080";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup on malformed values; every variable has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// `None` means the bundled `data/majors.csv`.
    pub majors_csv: Option<PathBuf>,
    /// `None` means the bundled `data/skills.csv`.
    pub skills_csv: Option<PathBuf>,
    pub experience_rounding: RoundingPolicy,
    /// LLM skill extraction and job-description parsing are disabled without it.
    pub anthropic_api_key: Option<String>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: var("PORT")
                .unwrap_or_else(|| DEFAULT_PORT.to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            majors_csv: var("MAJORS_CSV").map(PathBuf::from),
            skills_csv: var("SKILLS_CSV").map(PathBuf::from),
            experience_rounding: match var("EXPERIENCE_ROUNDING") {
                Some(raw) => raw
                    .parse::<RoundingPolicy>()
                    .map_err(|e| anyhow!(e))
                    .context("EXPERIENCE_ROUNDING is invalid")?,
                None => RoundingPolicy::default(),
            },
            anthropic_api_key: var("ANTHROPIC_API_KEY"),
            max_upload_bytes: match var("MAX_UPLOAD_BYTES") {
                Some(raw) => raw
                    .parse::<usize>()
                    .with_context(|| format!("MAX_UPLOAD_BYTES must be a byte count, got '{raw}'"))?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}
