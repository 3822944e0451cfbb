//! Résumé analysis, the first model call of the review pipeline.

use tracing::info;

use crate::llm_client::prompts::JSON_OBJECT_INSTRUCTION;
use crate::llm_client::JsonModel;
use crate::models::analysis::AnalysisResult;
use crate::review::pipeline::JobContext;
use crate::review::prompts::{
    fill_template, ANALYSIS_PROMPT_TEMPLATE, GENERAL_INSTRUCTION_TEMPLATE,
    JOB_DESCRIPTION_LABEL, JOB_DESCRIPTION_SECTION_TEMPLATE, TAILORED_INSTRUCTION,
};

/// Builds the analysis prompt.
///
/// The job-description block is included only when the description is
/// non-blank; otherwise the model is told to use general expectations for the role.
pub fn build_analysis_prompt(resume_text: &str, job: &JobContext) -> String {
    let (job_description_section, tailoring_instruction) = match job.job_description() {
        Some(description) => (
            fill_template(
                JOB_DESCRIPTION_SECTION_TEMPLATE,
                &[
                    ("label", JOB_DESCRIPTION_LABEL),
                    ("job_description", description),
                ],
            ),
            TAILORED_INSTRUCTION.to_string(),
        ),
        None => (
            String::new(),
            fill_template(
                GENERAL_INSTRUCTION_TEMPLATE,
                &[("target_role", job.target_role.as_str())],
            ),
        ),
    };

    fill_template(
        ANALYSIS_PROMPT_TEMPLATE,
        &[
            ("target_role", job.target_role.as_str()),
            ("job_description_section", job_description_section.as_str()),
            ("tailoring_instruction", tailoring_instruction.as_str()),
            ("json_object_instruction", JSON_OBJECT_INSTRUCTION),
            ("resume_text", resume_text),
        ],
    )
}

/// Runs the analysis call. Errors come back as human-readable messages.
pub async fn analyze_resume(
    model: &dyn JsonModel,
    resume_text: &str,
    job: &JobContext,
) -> Result<AnalysisResult, String> {
    let prompt = build_analysis_prompt(resume_text, job);

    let value = model
        .invoke_json(&prompt)
        .await
        .map_err(|e| format!("Failed to get analysis: {e}"))?;

    let analysis = AnalysisResult::from_model_value(value)
        .map_err(|e| format!("Failed to get analysis: malformed response: {e}"))?;

    info!(
        "Analysis complete: score={}/100, strengths={}, improvements={}",
        analysis.overall_score,
        analysis.strengths.len(),
        analysis.areas_for_improvement.len()
    );
    Ok(analysis)
}
