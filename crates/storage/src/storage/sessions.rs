use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension as _};
use sitepilot_core::{
    MetricMap, OptimizationResult, OptimizationSuggestion, SessionRecord, SessionSnapshot,
    SessionStep, StepData,
};

use super::{get_conn, log_row_error, parse_json, Storage};
use crate::error::StorageError;

impl Storage {
    /// Create a new session row for the domain.
    ///
    /// Always inserts; existing sessions for the same domain are left alone.
    ///
    /// # Errors
    /// Returns error if database insert fails.
    pub fn create_session(&self, domain: &str) -> Result<i64, StorageError> {
        let conn = get_conn(&self.pool)?;
        conn.execute(
            "INSERT INTO sessions (domain, created_at) VALUES (?1, ?2)",
            params![domain, Utc::now().to_rfc3339()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Get the most recently created session for a domain with its steps and
    /// current optimization result. `None` when the domain has no sessions —
    /// that is not an error.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_latest(&self, domain: &str) -> Result<Option<SessionSnapshot>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let head = conn
            .query_row(
                "SELECT id, domain, created_at FROM sessions
                   WHERE domain = ?1 ORDER BY created_at DESC, id DESC LIMIT 1",
                params![domain],
                |row| {
                    Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
                },
            )
            .optional()?;

        let Some((id, domain, created_at)) = head else {
            return Ok(None);
        };

        Ok(Some(SessionSnapshot {
            id,
            domain,
            created_at: parse_timestamp(&created_at)?,
            steps: load_steps(&conn, id)?,
            optimization_result: load_results(&conn, id)?.into_iter().next(),
        }))
    }

    /// All sessions for a domain, newest first, each with its steps and all
    /// of its optimization results.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_history(&self, domain: &str) -> Result<Vec<SessionRecord>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT id, domain, created_at FROM sessions
               WHERE domain = ?1 ORDER BY created_at DESC, id DESC",
        )?;
        let heads: Vec<(i64, String, String)> = stmt
            .query_map(params![domain], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
            })?
            .filter_map(log_row_error)
            .collect();

        let mut records = Vec::with_capacity(heads.len());
        for (id, domain, created_at) in heads {
            records.push(SessionRecord {
                id,
                domain,
                created_at: parse_timestamp(&created_at)?,
                steps: load_steps(&conn, id)?,
                optimization_results: load_results(&conn, id)?,
            });
        }
        Ok(records)
    }

    /// Number of session rows stored for a domain.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn session_count(&self, domain: &str) -> Result<usize, StorageError> {
        let conn = get_conn(&self.pool)?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sessions WHERE domain = ?1",
            params![domain],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(s).map(|d| d.with_timezone(&Utc)).map_err(|e| {
        StorageError::DataCorruption { context: format!("timestamp '{s}'"), source: Box::new(e) }
    })
}

/// Load a session's steps in ascending step order.
///
/// Rows that fail payload validation are skipped with a warning so one
/// corrupt step cannot make the whole session unreadable.
fn load_steps(conn: &Connection, session_id: i64) -> Result<Vec<SessionStep>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT step_number, step_data FROM session_steps
           WHERE session_id = ?1 ORDER BY step_number ASC",
    )?;
    let rows = stmt.query_map(params![session_id], |row| {
        let step_number: u8 = row.get(0)?;
        let payload: serde_json::Value = parse_json(&row.get::<_, String>(1)?)?;
        Ok((step_number, payload))
    })?;

    let mut steps = Vec::new();
    for row in rows {
        let Some((step_number, payload)) = log_row_error(row) else { continue };
        match StepData::from_parts(step_number, payload) {
            Ok(data) => steps.push(SessionStep { step_number, data }),
            Err(e) => {
                tracing::warn!(session_id, step_number, error = %e, "skipping malformed step row");
            },
        }
    }
    Ok(steps)
}

/// Load a session's optimization results, newest first.
fn load_results(conn: &Connection, session_id: i64) -> Result<Vec<OptimizationResult>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT agent_id, suggestions, metrics, created_at FROM optimization_results
           WHERE session_id = ?1 ORDER BY created_at DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![session_id], |row| {
        let agent_id: String = row.get(0)?;
        let suggestions: Vec<OptimizationSuggestion> = parse_json(&row.get::<_, String>(1)?)?;
        let metrics: MetricMap = parse_json(&row.get::<_, String>(2)?)?;
        let created_at: String = row.get(3)?;
        Ok((agent_id, suggestions, metrics, created_at))
    })?;

    let mut results = Vec::new();
    for row in rows {
        let Some((agent_id, suggestions, metrics, created_at)) = log_row_error(row) else {
            continue;
        };
        results.push(OptimizationResult {
            agent_id,
            suggestions,
            metrics,
            created_at: parse_timestamp(&created_at)?,
        });
    }
    Ok(results)
}
