use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::step::StepData;

/// Map of metric name to score, as stored on an optimization result.
pub type MetricMap = BTreeMap<String, f64>;

/// Expected impact of a single optimization suggestion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// One concrete optimization recommendation inside a result bundle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptimizationSuggestion {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub implementation: String,
}

/// A persisted optimization outcome, append-only per session.
///
/// The most recently created row for a session is the current one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub agent_id: String,
    pub suggestions: Vec<OptimizationSuggestion>,
    pub metrics: MetricMap,
    pub created_at: DateTime<Utc>,
}

/// One stored wizard step of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStep {
    pub step_number: u8,
    pub data: StepData,
}

/// The latest session for a domain with its steps and current result.
///
/// This is the shape handed to clients on every session read or upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub id: i64,
    pub domain: String,
    pub created_at: DateTime<Utc>,
    pub steps: Vec<SessionStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization_result: Option<OptimizationResult>,
}

/// A historical session with all of its optimization results, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: i64,
    pub domain: String,
    pub created_at: DateTime<Utc>,
    pub steps: Vec<SessionStep>,
    pub optimization_results: Vec<OptimizationResult>,
}
