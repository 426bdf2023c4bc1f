pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::job_description::handlers::handle_parse_job_description;
use crate::parser::handlers::handle_upload_resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes", post(handle_upload_resume))
        .route(
            "/api/v1/job-descriptions",
            post(handle_parse_job_description),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
