// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System instruction sent with every call; enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to every review prompt so the schema list is read literally.
pub const JSON_OBJECT_INSTRUCTION: &str = "Return ONLY a JSON object. \
    Use the exact key names listed; do not rename, nest, or add keys.";
