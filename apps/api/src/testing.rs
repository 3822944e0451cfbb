//! Test doubles shared by module tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::llm_client::{JsonModel, LlmError};
use crate::models::analysis::AnalysisResult;
use crate::models::resume::ImprovedResume;
use crate::render::{DocumentRenderer, RenderError};

/// A `JsonModel` that replays canned responses in order and records prompts.
/// Running out of responses is reported as `LlmError::EmptyContent`.
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Result<Value, LlmError>>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    pub fn new(responses: Vec<Result<Value, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl JsonModel for ScriptedModel {
    async fn invoke_json(&self, prompt: &str) -> Result<Value, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Renderer that returns a fixed PDF-looking payload without touching Typst.
pub struct StaticRenderer;

#[async_trait]
impl DocumentRenderer for StaticRenderer {
    async fn render(&self, _resume: &ImprovedResume) -> Result<Vec<u8>, RenderError> {
        Ok(b"%PDF-1.7 test".to_vec())
    }
}

pub fn analysis_json() -> Value {
    json!({
        "overall_score": 72,
        "strengths": ["Designs resilient services", "Strong Python", "Mentors juniors"],
        "areas_for_improvement": ["Quantify impact", "Add a summary", "Group skills"],
        "missing_keywords": ["Kubernetes", "gRPC"],
        "formatting_and_clarity": "Consistent layout; bullets run long.",
        "ats_compliance_tips": ["Use standard section headings", "Avoid two-column layouts"]
    })
}

pub fn sample_analysis() -> AnalysisResult {
    serde_json::from_value(analysis_json()).unwrap()
}
