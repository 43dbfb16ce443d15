//! LLM client for suggestion generation and website descriptions

mod ai_types;
mod client;
mod describe;
mod error;
#[cfg(test)]
mod generation_tests;
mod suggestions;

pub use client::{LlmClient, DEFAULT_MODEL};
pub use error::LlmError;
pub use suggestions::{SuggestionContext, SuggestionGenerator, SUGGESTION_BATCH};
