use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::JsonLlm;
use crate::parser::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Gazetteers, entity recogniser and skill sources are loaded once and
    /// shared read-only by every request.
    pub parser: Arc<ResumeParser>,
    /// `DisabledLlm` when no API key is configured.
    pub llm: Arc<dyn JsonLlm>,
    pub config: Config,
}
