use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::job_description::parse_job_description;
use crate::models::JobDescription;
use crate::parser::handlers::read_upload;
use crate::parser::text::DocumentKind;
use crate::state::AppState;

pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

#[derive(Debug, Deserialize)]
pub struct JobDescriptionRequest {
    pub text: String,
}

/// POST /api/v1/job-descriptions
/// Accepts `{"text": ...}` or a multipart upload in the `job_description` field.
pub async fn handle_parse_job_description(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<JobDescription>, AppError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    let text = if is_multipart {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        let upload = read_upload(multipart, JOB_DESCRIPTION_FIELD).await?;
        let kind = DocumentKind::detect(Some(&upload.file_name), upload.content_type.as_deref())?;
        info!("Extracting text from job description '{}'", upload.file_name);
        tokio::task::spawn_blocking(move || kind.extractor().extract_text(&upload.bytes))
            .await
            .map_err(|e| AppError::Internal(e.into()))??
    } else {
        let Json(body) = Json::<JobDescriptionRequest>::from_request(request, &state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        body.text
    };

    if text.trim().is_empty() {
        return Err(AppError::Validation("Job description text is empty".to_string()));
    }

    Ok(Json(parse_job_description(&text, state.llm.as_ref()).await))
}
