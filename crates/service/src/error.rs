//! Typed error enum for the service layer.
//!
//! Unifies storage, LLM, extraction, and catalog failures into a single
//! error type, enabling callers to match on specific failure modes instead
//! of downcasting opaque boxes.

use sitepilot_core::{CatalogError, StepError};
use sitepilot_extract::ExtractError;
use sitepilot_llm::LlmError;
use sitepilot_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying the failure modes beneath it.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Chat-completion call failed.
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    /// Website content extraction failed.
    #[error("extract: {0}")]
    Extract(#[from] ExtractError),

    /// Agent catalog lookup failed (unknown agent id).
    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// Step payload failed validation at the boundary.
    #[error("step: {0}")]
    Step(#[from] StepError),

    /// Caller provided invalid input (missing domain, empty field).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No session exists for the domain where one is required.
    #[error("no session found for domain '{domain}'")]
    SessionNotFound { domain: String },
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::SessionNotFound { .. })
    }
}
