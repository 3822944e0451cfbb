//! Axum route handlers for the Review API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract_text, resolve_content_type};
use crate::review::pipeline::{run_pipeline, JobContext, PipelineResult};
use crate::review::sample::{sample_input, SampleInput};
use crate::state::AppState;

/// Body limit for `/api/v1/review/upload`, covering both file parts.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub resume_text: String,
    #[serde(flatten)]
    pub job: JobContext,
}

/// An uploaded file part: bytes plus the content type to extract it as.
#[derive(Debug)]
struct UploadedFile {
    content_type: String,
    data: Bytes,
}

/// Fields collected from a `multipart/form-data` review request.
#[derive(Debug, Default)]
struct UploadForm {
    resume_file: Option<UploadedFile>,
    resume_text: Option<String>,
    target_role: Option<String>,
    job_description_file: Option<UploadedFile>,
    job_description: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/review/sample
pub async fn handle_sample() -> Json<SampleInput> {
    Json(sample_input())
}

/// POST /api/v1/review
///
/// Runs analysis and rewrite on pasted text. Model failures are reported inside
/// the returned `PipelineResult`; only invalid input is an error response.
pub async fn handle_review(
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<PipelineResult>, AppError> {
    let result = run_pipeline(state.model.as_ref(), &request.resume_text, &request.job).await?;
    Ok(Json(result))
}

/// POST /api/v1/review/upload
///
/// Multipart variant: `resume_file` or `resume_text`, `target_role`, and
/// optionally `job_description_file` or `job_description`. A non-empty file
/// takes precedence over the matching text field.
pub async fn handle_review_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PipelineResult>, AppError> {
    let form = read_upload_form(multipart).await?;

    let resume_text = match form.resume_file {
        Some(file) => {
            info!("Extracting resume from {} upload", file.content_type);
            extract_text(file.data, &file.content_type).await?
        }
        None => form.resume_text.unwrap_or_default(),
    };

    let job_description = match form.job_description_file {
        Some(file) => Some(extract_text(file.data, &file.content_type).await?),
        None => form.job_description,
    };

    let job = JobContext::new(form.target_role.unwrap_or_default(), job_description);
    let result = run_pipeline(state.model.as_ref(), &resume_text, &job).await?;
    Ok(Json(result))
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error("Malformed multipart body", e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume_file" | "job_description_file" => {
                let content_type = resolve_content_type(field.content_type(), field.file_name());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| upload_error(&format!("Failed to read {name}"), e))?;
                // Browsers send an empty part when no file was chosen.
                if data.is_empty() {
                    continue;
                }
                let file = Some(UploadedFile { content_type, data });
                if name == "resume_file" {
                    form.resume_file = file;
                } else {
                    form.job_description_file = file;
                }
            }
            "resume_text" | "target_role" | "job_description" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| upload_error(&format!("Failed to read {name}"), e))?;
                match name.as_str() {
                    "resume_text" => form.resume_text = Some(text),
                    "target_role" => form.target_role = Some(text),
                    _ => form.job_description = Some(text),
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

fn upload_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!(
            "Upload exceeds the {} MB limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        ))
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}
