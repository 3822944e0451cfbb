// Résumé review: analysis prompt, rewrite prompt, field normalization and the
// two-call pipeline that ties them together.
// All LLM calls go through llm_client::JsonModel.

pub mod analysis;
pub mod handlers;
pub mod normalizer;
pub mod pipeline;
pub mod prompts;
pub mod rewrite;
pub mod sample;
