//! Review pipeline: analyze → rewrite → normalize.
//!
//! ```text
//! START → ANALYZE ─ err ─→ AnalysisFailed
//!            └ ok → REWRITE ─ err ─→ Partial   (analysis kept, improved_resume = {})
//!                      └ ok → NORMALIZE → Completed
//! ```
//!
//! The rewrite prompt embeds the analysis, so the two calls are strictly sequential.
//! Model failures never escape as `Err`; they become data in `PipelineResult`.
//! Only input validation fails the call outright, before any model is invoked.

use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::JsonModel;
use crate::models::analysis::AnalysisResult;
use crate::models::resume::ImprovedResume;
use crate::review::analysis::analyze_resume;
use crate::review::normalizer::normalize_resume;
use crate::review::rewrite::rewrite_resume;

/// Target role plus an optional job description.
#[derive(Debug, Clone, Deserialize)]
pub struct JobContext {
    pub target_role: String,
    #[serde(default)]
    job_description: Option<String>,
}

impl JobContext {
    pub fn new(target_role: impl Into<String>, job_description: Option<String>) -> Self {
        Self {
            target_role: target_role.into(),
            job_description,
        }
    }

    /// The job description, or `None` when it is absent or only whitespace.
    pub fn job_description(&self) -> Option<&str> {
        self.job_description
            .as_deref()
            .filter(|jd| !jd.trim().is_empty())
    }
}

/// Result of one pipeline step: the payload, or `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StepOutcome<T> {
    Success(T),
    Failed { error: String },
}

/// Terminal state of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Completed,
    Partial,
    AnalysisFailed,
}

/// Everything one run produced. Owned by the caller; nothing is retained.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub status: PipelineStatus,
    pub analysis: StepOutcome<AnalysisResult>,
    /// Canonical résumé; empty (`{}`) unless `status` is `Completed`.
    pub improved_resume: ImprovedResume,
    /// Why the rewrite failed; present only for `Partial`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewrite_error: Option<String>,
}

/// Runs the two-call review pipeline.
///
/// Returns `AppError::Validation` without contacting the model when the résumé
/// text or target role is blank.
pub async fn run_pipeline(
    model: &dyn JsonModel,
    resume_text: &str,
    job: &JobContext,
) -> Result<PipelineResult, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "Resume text is required. Upload a PDF/TXT file or paste the resume.".to_string(),
        ));
    }
    if job.target_role.trim().is_empty() {
        return Err(AppError::Validation(
            "Target job role is required.".to_string(),
        ));
    }

    let run_id = Uuid::new_v4();
    let span = info_span!("review", %run_id, role = %job.target_role);

    Ok(execute(model, resume_text, job).instrument(span).await)
}

async fn execute(model: &dyn JsonModel, resume_text: &str, job: &JobContext) -> PipelineResult {
    info!(
        "Step 1/2: analyzing resume (job description: {})",
        if job.job_description().is_some() { "provided" } else { "none" }
    );
    let analysis = match analyze_resume(model, resume_text, job).await {
        Ok(analysis) => analysis,
        Err(error) => {
            warn!("Analysis failed: {error}");
            return PipelineResult {
                status: PipelineStatus::AnalysisFailed,
                analysis: StepOutcome::Failed { error },
                improved_resume: ImprovedResume::default(),
                rewrite_error: None,
            };
        }
    };

    info!("Step 2/2: rewriting resume");
    match rewrite_resume(model, resume_text, &analysis).await {
        Ok(mut improved_resume) => {
            normalize_resume(&mut improved_resume);
            info!("Review complete");
            PipelineResult {
                status: PipelineStatus::Completed,
                analysis: StepOutcome::Success(analysis),
                improved_resume,
                rewrite_error: None,
            }
        }
        Err(error) => {
            warn!("Rewrite failed, returning analysis only: {error}");
            PipelineResult {
                status: PipelineStatus::Partial,
                analysis: StepOutcome::Success(analysis),
                improved_resume: ImprovedResume::default(),
                rewrite_error: Some(error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use crate::testing::{analysis_json, ScriptedModel};
    use serde_json::json;

    const JANE: &str = "Jane Smith, Backend Engineer, 5 years Python.\n\
        Experience:\n\
        - Senior Backend Engineer, Acme Corp, 2021-2024\n\
        - Backend Engineer, Initech, 2019-2021\n\
        Education: BSc Computer Science, State University";

    fn success<T>(outcome: &StepOutcome<T>) -> Option<&T> {
        match outcome {
            StepOutcome::Success(value) => Some(value),
            StepOutcome::Failed { .. } => None,
        }
    }

    fn failure<T>(outcome: &StepOutcome<T>) -> Option<&str> {
        match outcome {
            StepOutcome::Success(_) => None,
            StepOutcome::Failed { error } => Some(error),
        }
    }

    fn backend() -> JobContext {
        JobContext::new("Backend Engineer", Some(String::new()))
    }

    #[test]
    fn test_job_context_deserializes_without_description() {
        let job: JobContext = serde_json::from_value(json!({"target_role": "SRE"})).unwrap();
        assert_eq!(job.target_role, "SRE");
        assert!(job.job_description().is_none());
    }

    #[tokio::test]
    async fn test_empty_resume_is_rejected_without_model_call() {
        let model = ScriptedModel::new(vec![]);
        let err = run_pipeline(&model, "", &backend()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_role_is_rejected_without_model_call() {
        let model = ScriptedModel::new(vec![]);
        let job = JobContext::new("   ", None);
        let err = run_pipeline(&model, JANE, &job).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_analysis_failure_skips_rewrite() {
        let model = ScriptedModel::new(vec![Err(LlmError::Api {
            status: 503,
            message: "overloaded".to_string(),
        })]);

        let result = run_pipeline(&model, JANE, &backend()).await.unwrap();

        assert_eq!(model.calls(), 1);
        assert_eq!(result.status, PipelineStatus::AnalysisFailed);
        assert!(result.improved_resume.is_empty());
        assert!(failure(&result.analysis).unwrap().contains("overloaded"));
        assert!(result.rewrite_error.is_none());
    }

    #[tokio::test]
    async fn test_empty_analysis_object_ends_run() {
        let model = ScriptedModel::new(vec![
            Ok(json!({})),
            Ok(json!({"personal_details": {"name": "Jane Smith"}})),
        ]);

        let result = run_pipeline(&model, JANE, &backend()).await.unwrap();

        assert_eq!(model.calls(), 1);
        assert_eq!(result.status, PipelineStatus::AnalysisFailed);
        assert!(failure(&result.analysis).unwrap().contains("malformed response"));
        assert!(result.improved_resume.is_empty());
    }

    #[tokio::test]
    async fn test_rewrite_failure_keeps_analysis() {
        let model = ScriptedModel::new(vec![
            Ok(analysis_json()),
            Err(LlmError::EmptyContent),
        ]);

        let result = run_pipeline(&model, JANE, &backend()).await.unwrap();

        assert_eq!(model.calls(), 2);
        assert_eq!(result.status, PipelineStatus::Partial);
        assert!(success(&result.analysis).is_some());
        assert!(result.improved_resume.is_empty());
        assert!(result.rewrite_error.unwrap().contains("empty content"));
    }

    #[tokio::test]
    async fn test_rewrite_prompt_embeds_analysis_output() {
        let model = ScriptedModel::new(vec![
            Ok(analysis_json()),
            Ok(json!({"personal_details": {"name": "Jane Smith"}})),
        ]);

        run_pipeline(&model, JANE, &backend()).await.unwrap();

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[1].contains("Designs resilient services"));
        assert!(prompts[1].contains(JANE));
    }

    #[tokio::test]
    async fn test_end_to_end_jane_smith() {
        let model = ScriptedModel::new(vec![
            Ok(analysis_json()),
            Ok(json!({
                "personal_details": {"name": "Jane Smith", "email": "jane@example.com"},
                "summary": "Backend engineer with 5 years of Python.",
                "experience": [
                    {"role": "Senior Backend Engineer", "company": "Acme Corp", "dates": "2021-2024"},
                    {"title": "Backend Engineer", "company": "Initech", "dates": "2019-2021"}
                ],
                "education": [{"major": "BSc Computer Science", "school": "State University"}],
                "skills": ["Python", "PostgreSQL"]
            })),
        ]);

        let result = run_pipeline(&model, JANE, &backend()).await.unwrap();

        assert_eq!(result.status, PipelineStatus::Completed);
        let analysis = success(&result.analysis).unwrap();
        assert!(analysis.overall_score <= 100);
        assert!(!analysis.strengths.is_empty());
        assert!(!analysis.areas_for_improvement.is_empty());

        let resume = &result.improved_resume;
        assert_eq!(resume.name(), Some("Jane Smith"));
        assert_eq!(resume.entries("experience").len(), 2);
        assert_eq!(resume.entries("experience")[0]["title"], "Senior Backend Engineer");
        assert_eq!(resume.entries("education")[0]["university"], "State University");
        assert_eq!(resume.entries("education")[0]["degree"], "BSc Computer Science");
    }

    #[tokio::test]
    async fn test_result_serialization_shapes() {
        let failed = PipelineResult {
            status: PipelineStatus::AnalysisFailed,
            analysis: StepOutcome::Failed {
                error: "boom".to_string(),
            },
            improved_resume: ImprovedResume::default(),
            rewrite_error: None,
        };
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({
                "status": "analysis_failed",
                "analysis": {"error": "boom"},
                "improved_resume": {}
            })
        );

        let model = ScriptedModel::new(vec![Ok(analysis_json()), Err(LlmError::EmptyContent)]);
        let partial = run_pipeline(&model, JANE, &backend()).await.unwrap();
        let value = serde_json::to_value(&partial).unwrap();
        assert_eq!(value["status"], "partial");
        assert_eq!(value["improved_resume"], json!({}));
        assert_eq!(value["analysis"]["overall_score"], 72);
        assert!(value["rewrite_error"].is_string());
    }
}
