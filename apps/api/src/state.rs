use std::sync::Arc;

use crate::llm_client::JsonModel;
use crate::render::DocumentRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable: each request runs its own pipeline over these collaborators.
#[derive(Clone)]
pub struct AppState {
    /// Hosted model used for analysis and rewrite. Production: `LlmClient`.
    pub model: Arc<dyn JsonModel>,
    /// PDF renderer. Production: `TypstRenderer`.
    pub renderer: Arc<dyn DocumentRenderer>,
}
