use chrono::Utc;
use rusqlite::params;
use sitepilot_core::{MetricMap, OptimizationSuggestion};

use super::{get_conn, Storage};
use crate::error::StorageError;

impl Storage {
    /// Append an optimization result row for a session.
    ///
    /// Results are append-only; the newest row is the current one.
    ///
    /// # Errors
    /// Returns error if database insert fails.
    pub fn append_result(
        &self,
        session_id: i64,
        agent_id: &str,
        suggestions: &[OptimizationSuggestion],
        metrics: &MetricMap,
    ) -> Result<(), StorageError> {
        let conn = get_conn(&self.pool)?;
        conn.execute(
            "INSERT INTO optimization_results (session_id, agent_id, suggestions, metrics, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                session_id,
                agent_id,
                serde_json::to_string(suggestions)?,
                serde_json::to_string(metrics)?,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Number of optimization result rows stored for a session.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn result_count(&self, session_id: i64) -> Result<usize, StorageError> {
        let conn = get_conn(&self.pool)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM optimization_results WHERE session_id = ?1",
            params![session_id],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}
