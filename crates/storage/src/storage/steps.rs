use chrono::Utc;
use rusqlite::{params, OptionalExtension as _};
use sitepilot_core::StepData;

use super::{get_conn, parse_json, Storage};
use crate::error::StorageError;

impl Storage {
    /// Write a step record, overwriting any previous payload for the same
    /// (session, step number) pair. Replaying the same call is a no-op.
    ///
    /// # Errors
    /// Returns error if database upsert fails.
    pub fn upsert_step(&self, session_id: i64, step: &StepData) -> Result<(), StorageError> {
        let conn = get_conn(&self.pool)?;
        conn.execute(
            "INSERT INTO session_steps (session_id, step_number, step_data, updated_at)
               VALUES (?1, ?2, ?3, ?4)
               ON CONFLICT(session_id, step_number)
               DO UPDATE SET step_data = excluded.step_data, updated_at = excluded.updated_at",
            params![
                session_id,
                step.step_number(),
                serde_json::to_string(step)?,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Read one step of a session, if it has been stored.
    ///
    /// # Errors
    /// Returns error if database query fails or the payload is invalid.
    pub fn get_step(
        &self,
        session_id: i64,
        step_number: u8,
    ) -> Result<Option<StepData>, StorageError> {
        let conn = get_conn(&self.pool)?;
        let payload: Option<serde_json::Value> = conn
            .query_row(
                "SELECT step_data FROM session_steps
                   WHERE session_id = ?1 AND step_number = ?2",
                params![session_id, step_number],
                |row| parse_json(&row.get::<_, String>(0)?),
            )
            .optional()?;

        payload
            .map(|value| {
                StepData::from_parts(step_number, value).map_err(|e| {
                    StorageError::DataCorruption {
                        context: format!("step {step_number} of session {session_id}"),
                        source: Box::new(e),
                    }
                })
            })
            .transpose()
    }
}
