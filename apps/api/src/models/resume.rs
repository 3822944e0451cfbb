use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A rewritten résumé as returned by the model.
///
/// The model is asked for `personal_details`, `summary`, `experience`,
/// `education` and `skills`, but key names drift between responses, so the
/// structure is kept as a loose JSON object. `review::normalizer` reconciles the
/// known synonyms; everything else passes through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImprovedResume(Map<String, Value>);

impl ImprovedResume {
    /// Accepts only JSON objects; any other shape is not a résumé.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    /// `personal_details.name`, if the model supplied a non-blank one.
    pub fn name(&self) -> Option<&str> {
        self.0
            .get("personal_details")
            .and_then(|d| d.get("name"))
            .and_then(|n| n.as_str())
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }

    /// Entries of a list-valued section such as `experience` or `education`.
    /// Returns an empty slice when the section is absent or not a list.
    pub fn entries(&self, section: &str) -> &[Value] {
        self.0
            .get(section)
            .and_then(|v| v.as_array())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
