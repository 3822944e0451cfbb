//! Résumé rewrite, the second model call of the review pipeline.
//!
//! The prompt demands that every personal detail, experience and education entry,
//! skill and achievement survives the rewrite. Nothing here can verify that; it is
//! an instruction to the model, not a guarantee.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_OBJECT_INSTRUCTION;
use crate::llm_client::JsonModel;
use crate::models::analysis::AnalysisResult;
use crate::models::resume::ImprovedResume;
use crate::review::prompts::{fill_template, REWRITE_PROMPT_TEMPLATE};

/// Builds the rewrite prompt from the original text and the critique.
pub fn build_rewrite_prompt(
    resume_text: &str,
    analysis: &AnalysisResult,
) -> Result<String, AppError> {
    let analysis_json = serde_json::to_string_pretty(analysis)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize analysis: {e}")))?;

    Ok(fill_template(
        REWRITE_PROMPT_TEMPLATE,
        &[
            ("json_object_instruction", JSON_OBJECT_INSTRUCTION),
            ("resume_text", resume_text),
            ("analysis_json", analysis_json.as_str()),
        ],
    ))
}

/// Runs the rewrite call. The returned résumé is raw (not yet normalized).
pub async fn rewrite_resume(
    model: &dyn JsonModel,
    resume_text: &str,
    analysis: &AnalysisResult,
) -> Result<ImprovedResume, String> {
    let prompt = build_rewrite_prompt(resume_text, analysis)
        .map_err(|e| format!("Failed to rewrite resume: {e}"))?;

    let value = model
        .invoke_json(&prompt)
        .await
        .map_err(|e| format!("Failed to rewrite resume: {e}"))?;

    let resume = ImprovedResume::from_value(value).ok_or_else(|| {
        "Failed to rewrite resume: model returned JSON that is not an object".to_string()
    })?;

    info!(
        "Rewrite complete: experience={}, education={}",
        resume.entries("experience").len(),
        resume.entries("education").len()
    );
    Ok(resume)
}
