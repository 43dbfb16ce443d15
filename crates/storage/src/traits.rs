//! Async facade over the synchronous SQLite store.

use async_trait::async_trait;
use sitepilot_core::{
    MetricMap, OptimizationSuggestion, SessionRecord, SessionSnapshot, StepData,
};

use crate::error::StorageError;

/// Session, step, and optimization-result persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a new session row for the domain; never merges with existing ones.
    async fn create_session(&self, domain: &str) -> Result<i64, StorageError>;

    /// Overwrite the step record keyed by (session, step number). Idempotent.
    async fn upsert_step(&self, session_id: i64, step: &StepData) -> Result<(), StorageError>;

    /// Read one stored step of a session.
    async fn get_step(
        &self,
        session_id: i64,
        step_number: u8,
    ) -> Result<Option<StepData>, StorageError>;

    /// Latest session for the domain with steps and current result; `None`
    /// when the domain has no sessions.
    async fn get_latest(&self, domain: &str) -> Result<Option<SessionSnapshot>, StorageError>;

    /// All sessions for the domain, newest first, with all results each.
    async fn get_history(&self, domain: &str) -> Result<Vec<SessionRecord>, StorageError>;

    /// Append an optimization result row for a session.
    async fn append_result(
        &self,
        session_id: i64,
        agent_id: &str,
        suggestions: &[OptimizationSuggestion],
        metrics: &MetricMap,
    ) -> Result<(), StorageError>;

    /// Number of session rows for a domain.
    async fn session_count(&self, domain: &str) -> Result<usize, StorageError>;

    /// Number of result rows for a session.
    async fn result_count(&self, session_id: i64) -> Result<usize, StorageError>;
}
