use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Keys the analysis prompt asks the model for.
pub const ANALYSIS_FIELDS: [&str; 6] = [
    "overall_score",
    "strengths",
    "areas_for_improvement",
    "missing_keywords",
    "formatting_and_clarity",
    "ats_compliance_tips",
];

#[derive(Debug, Error)]
pub enum AnalysisShapeError {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("none of the analysis fields are present (found keys: {0})")]
    NoKnownFields(String),

    #[error(transparent)]
    Invalid(#[from] serde_json::Error),
}

/// The structured critique produced by the first model call.
///
/// Every field defaults when missing so a partially-conforming response still
/// yields a usable critique. `overall_score` is clamped into `0..=100`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "deserialize_score")]
    pub overall_score: u8,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub formatting_and_clarity: String,
    #[serde(default)]
    pub ats_compliance_tips: Vec<String>,
}

impl AnalysisResult {
    /// Reads a model response. Missing fields default, but the response must be
    /// an object carrying at least one of `ANALYSIS_FIELDS`.
    pub fn from_model_value(value: Value) -> Result<Self, AnalysisShapeError> {
        let fields = match &value {
            Value::Object(fields) => fields,
            other => return Err(AnalysisShapeError::NotAnObject(json_kind(other))),
        };

        if !ANALYSIS_FIELDS.iter().any(|key| fields.contains_key(*key)) {
            let found = if fields.is_empty() {
                "none".to_string()
            } else {
                fields.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
            };
            return Err(AnalysisShapeError::NoKnownFields(found));
        }

        Ok(serde_json::from_value(value)?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Accepts integers, floats and numeric strings; anything else scores 0.
fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let score = match raw {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s
            .trim()
            .trim_end_matches("/100")
            .trim()
            .parse::<f64>()
            .unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(score.round().clamp(0.0, 100.0) as u8)
}
