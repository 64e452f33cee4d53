// Roadmap generation and link-healing pipeline.
// All LLM calls go through llm_client; all link probes go through link_validator.

pub mod finder;
pub mod generator;
pub mod handlers;
pub mod link_validator;
pub mod models;
pub mod prompts;
pub mod reconciler;
pub mod store;
