//! Async trait implementation for SQLite `Storage` via `spawn_blocking`.

use async_trait::async_trait;
use sitepilot_core::{
    MetricMap, OptimizationSuggestion, SessionRecord, SessionSnapshot, StepData,
};

use crate::error::StorageError;
use crate::traits::SessionStore;
use crate::Storage;

/// Helper: run a blocking closure on the tokio blocking pool.
async fn blocking<F, T>(f: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| StorageError::TaskJoin(e.to_string()))?
}

/// Body-generating macro for async-to-blocking delegation.
///
/// Each argument is annotated with a capture kind:
/// - `@ref arg`      — `.clone()` a `&T`, pass as `&arg`
/// - `@str arg`      — `.to_owned()` a `&str`, pass as `&arg`
/// - `@slice arg`    — `.to_vec()` a `&[T]`, pass as `&arg`
/// - `@val arg`      — move directly (Copy/owned types)
macro_rules! delegate {
    ($self:ident, $method:ident $(, @$kind:ident $arg:ident)*) => {{
        let s = $self.clone();
        $(delegate!(@capture $kind $arg);)*
        blocking(move || s.$method($(delegate!(@pass $kind $arg)),*)).await
    }};
    (@capture ref $arg:ident) => { let $arg = $arg.clone(); };
    (@capture str $arg:ident) => { let $arg = $arg.to_owned(); };
    (@capture slice $arg:ident) => { let $arg = $arg.to_vec(); };
    (@capture val $arg:ident) => { };
    (@pass ref $arg:ident) => { &$arg };
    (@pass str $arg:ident) => { &$arg };
    (@pass slice $arg:ident) => { &$arg };
    (@pass val $arg:ident) => { $arg };
}

#[async_trait]
impl SessionStore for Storage {
    async fn create_session(&self, domain: &str) -> Result<i64, StorageError> {
        delegate!(self, create_session, @str domain)
    }

    async fn upsert_step(&self, session_id: i64, step: &StepData) -> Result<(), StorageError> {
        delegate!(self, upsert_step, @val session_id, @ref step)
    }

    async fn get_step(
        &self,
        session_id: i64,
        step_number: u8,
    ) -> Result<Option<StepData>, StorageError> {
        delegate!(self, get_step, @val session_id, @val step_number)
    }

    async fn get_latest(&self, domain: &str) -> Result<Option<SessionSnapshot>, StorageError> {
        delegate!(self, get_latest, @str domain)
    }

    async fn get_history(&self, domain: &str) -> Result<Vec<SessionRecord>, StorageError> {
        delegate!(self, get_history, @str domain)
    }

    async fn append_result(
        &self,
        session_id: i64,
        agent_id: &str,
        suggestions: &[OptimizationSuggestion],
        metrics: &MetricMap,
    ) -> Result<(), StorageError> {
        delegate!(self, append_result, @val session_id, @str agent_id, @slice suggestions, @ref metrics)
    }

    async fn session_count(&self, domain: &str) -> Result<usize, StorageError> {
        delegate!(self, session_count, @str domain)
    }

    async fn result_count(&self, session_id: i64) -> Result<usize, StorageError> {
        delegate!(self, result_count, @val session_id)
    }
}
