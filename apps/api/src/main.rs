mod config;
mod errors;
mod extraction;
mod job_description;
mod llm_client;
mod models;
mod parser;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::ner::EntityRecognizer;
use crate::extraction::{
    ExperienceCalculator, Gazetteer, GazetteerSkillSource, LazyRecognizer, LlmSkillSource,
    NerSkillSource, RuleBasedRecognizer, SkillExtractor,
};
use crate::llm_client::{DisabledLlm, JsonLlm, LlmClient};
use crate::parser::ResumeParser;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resumatch v{}", env!("CARGO_PKG_VERSION"));

    // Gazetteers are immutable after load and shared by every request
    let majors = Arc::new(load_gazetteer(
        config.majors_csv.as_deref(),
        Gazetteer::bundled_majors,
        "majors",
    )?);
    let skills = load_gazetteer(
        config.skills_csv.as_deref(),
        Gazetteer::bundled_skills,
        "skills",
    )?;

    // Entity recognizer is built on first use
    let ner: Arc<dyn EntityRecognizer> = Arc::new(LazyRecognizer::new("rule-based", || {
        Ok(Box::new(RuleBasedRecognizer::new()) as Box<dyn EntityRecognizer>)
    }));

    // LLM client (optional: skill and job-description extraction degrade without it)
    let llm: Arc<dyn JsonLlm> = match &config.anthropic_api_key {
        Some(key) => {
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(LlmClient::new(key.clone()))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; LLM skill extraction and job-description parsing are disabled");
            Arc::new(DisabledLlm)
        }
    };

    let mut skill_extractor =
        SkillExtractor::default().with_source(Arc::new(GazetteerSkillSource::new(&skills)));
    match NerSkillSource::for_recognizer(ner.clone()) {
        Some(source) => skill_extractor = skill_extractor.with_source(Arc::new(source)),
        None => info!(
            "Entity recognizer '{}' does not tag skills; NER skill source skipped",
            ner.name()
        ),
    }
    if config.anthropic_api_key.is_some() {
        skill_extractor = skill_extractor.with_source(Arc::new(LlmSkillSource::new(llm.clone())));
    }
    info!("Skill sources: {:?}", skill_extractor.source_names());

    info!("Experience rounding policy: {}", config.experience_rounding);
    let parser = ResumeParser::new(majors)
        .with_ner(ner)
        .with_experience(ExperienceCalculator::new(config.experience_rounding))
        .with_skills(skill_extractor);

    // Build app state
    let state = AppState {
        parser: Arc::new(parser),
        llm,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Loads a gazetteer from `path`, or the bundled copy when no path is configured.
fn load_gazetteer(
    path: Option<&Path>,
    bundled: fn() -> Result<Gazetteer, extraction::GazetteerError>,
    what: &str,
) -> Result<Gazetteer> {
    let gazetteer = match path {
        Some(path) => Gazetteer::load(path)
            .with_context(|| format!("Failed to load {what} gazetteer from {}", path.display()))?,
        None => bundled().with_context(|| format!("Bundled {what} gazetteer is malformed"))?,
    };
    info!("{} gazetteer: {} terms", what, gazetteer.len());
    Ok(gazetteer)
}
