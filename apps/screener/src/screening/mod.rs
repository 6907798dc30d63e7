// Screening: prompt construction, one LLM call, response parsing and export.
// All LLM calls go through llm_client::AnalysisService.

pub mod export;
pub mod handlers;
pub mod parser;
pub mod pipeline;
pub mod prompt_builder;
pub mod prompts;
pub mod session;
