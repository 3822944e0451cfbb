//! Axum route handlers for the Render API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::errors::AppError;
use crate::models::resume::ImprovedResume;
use crate::render::download_file_name;
use crate::review::normalizer::normalize_resume;
use crate::state::AppState;

/// POST /api/v1/render
///
/// Renders an improved résumé to PDF. The body is normalized first, which is a
/// no-op for output of `/api/v1/review`.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(mut resume): Json<ImprovedResume>,
) -> Result<Response, AppError> {
    if resume.is_empty() {
        return Err(AppError::Validation(
            "No improved resume data to render".to_string(),
        ));
    }
    normalize_resume(&mut resume);

    let pdf = state.renderer.render(&resume).await?;
    let disposition = format!("attachment; filename=\"{}\"", download_file_name(&resume));

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}
