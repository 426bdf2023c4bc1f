use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::CandidateRecord;
use crate::parser::text::DocumentKind;
use crate::parser::DocumentInput;
use crate::state::AppState;

pub const RESUME_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub document_id: Uuid,
    pub file_name: String,
    pub file_size: usize,
    pub candidate: CandidateRecord,
}

/// A file part pulled out of a multipart body.
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Reads the named file part. 400 when it is missing or has no file name.
pub async fn read_upload(mut multipart: Multipart, field_name: &str) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let raw_name = field.file_name().unwrap_or_default().to_string();
        if raw_name.trim().is_empty() {
            return Err(AppError::Validation("No selected file".to_string()));
        }
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        return Ok(UploadedFile {
            file_name: sanitize_file_name(&raw_name),
            content_type,
            bytes,
        });
    }

    Err(AppError::Validation(format!("No file part '{field_name}'")))
}

/// POST /api/v1/resumes
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let upload = read_upload(multipart, RESUME_FIELD).await?;
    let kind = DocumentKind::detect(Some(&upload.file_name), upload.content_type.as_deref())?;
    let file_size = upload.bytes.len();

    info!(
        "Parsing uploaded résumé '{}' ({} bytes, {:?})",
        upload.file_name, file_size, kind
    );

    let input = DocumentInput::from_bytes(upload.bytes).with_kind(kind);
    let candidate = state.parser.parse_with_skills(input).await?;

    Ok(Json(ResumeUploadResponse {
        document_id: Uuid::new_v4(),
        file_name: upload.file_name,
        file_size,
        candidate,
    }))
}

/// Reduces a client-supplied file name to a safe single path component:
/// directories are dropped, whitespace becomes `_`, and anything outside
/// `[A-Za-z0-9._-]` is removed. Never returns an empty or dot-only name.
pub fn sanitize_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);

    let cleaned: String = base
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_');

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
