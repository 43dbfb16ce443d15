//! Transient wizard state and its reconciliation from stored sessions.
//!
//! `WizardState` is never persisted as a whole. It is rebuilt from the
//! latest stored session whenever the domain changes, and mutated field by
//! field as the user progresses. Reconciliation is a pure fold: each stored
//! step sets only the fields its payload carries, so a session missing step
//! 3 leaves the description unset instead of clearing it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::agents::{agent_by_id, Agent};
use crate::question::QuestionType;
use crate::session::{OptimizationResult, SessionSnapshot};
use crate::step::StepData;

/// In-memory view of wizard progress for one domain.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<Agent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization_context: Option<BTreeMap<QuestionType, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<OptimizationResult>,
}

impl WizardState {
    /// Apply one step payload, returning the updated state.
    ///
    /// A stored agent id that is no longer in the catalog leaves the
    /// selection unset; stored data is not a programming fault.
    #[must_use]
    pub fn with_step(mut self, step: &StepData) -> Self {
        match step {
            StepData::Url { url } => self.url = Some(url.clone()),
            StepData::Agent { agent_id } => match agent_by_id(agent_id) {
                Some(agent) => self.agent = Some(*agent),
                None => {
                    tracing::warn!(agent_id = %agent_id, "stored step references unknown agent");
                },
            },
            StepData::Description { site_description } => {
                self.site_description = Some(site_description.clone());
            },
            StepData::Context { optimization_context } => {
                self.optimization_context = Some(optimization_context.clone());
            },
        }
        self
    }

    /// Rebuild state wholesale from the latest stored session.
    ///
    /// Steps are replayed in ascending step order; the snapshot's current
    /// optimization result is attached as-is.
    #[must_use]
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        let mut steps: Vec<_> = snapshot.steps.iter().collect();
        steps.sort_by_key(|step| step.step_number);
        let mut state =
            steps.into_iter().fold(Self::default(), |state, step| state.with_step(&step.data));
        state.result = snapshot.optimization_result.clone();
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStep;
    use chrono::Utc;

    fn snapshot_with_steps(steps: Vec<SessionStep>) -> SessionSnapshot {
        SessionSnapshot {
            id: 1,
            domain: "example.com".to_owned(),
            created_at: Utc::now(),
            steps,
            optimization_result: None,
        }
    }

    #[test]
    fn partial_session_leaves_missing_fields_unset() {
        let snapshot = snapshot_with_steps(vec![
            SessionStep {
                step_number: 1,
                data: StepData::Url { url: "https://example.com".to_owned() },
            },
            SessionStep { step_number: 2, data: StepData::Agent { agent_id: "max".to_owned() } },
        ]);

        let state = WizardState::from_snapshot(&snapshot);
        assert_eq!(state.url.as_deref(), Some("https://example.com"));
        assert_eq!(state.agent.map(|a| a.name), Some("Max"));
        assert!(state.site_description.is_none());
        assert!(state.optimization_context.is_none());
        assert!(state.result.is_none());
    }

    #[test]
    fn steps_replay_in_ascending_order_regardless_of_storage_order() {
        let snapshot = snapshot_with_steps(vec![
            SessionStep {
                step_number: 3,
                data: StepData::Description { site_description: "A store".to_owned() },
            },
            SessionStep {
                step_number: 1,
                data: StepData::Url { url: "https://example.com".to_owned() },
            },
        ]);

        let state = WizardState::from_snapshot(&snapshot);
        assert_eq!(state.url.as_deref(), Some("https://example.com"));
        assert_eq!(state.site_description.as_deref(), Some("A store"));
    }

    #[test]
    fn unknown_agent_id_leaves_agent_unset() {
        let state = WizardState::default()
            .with_step(&StepData::Agent { agent_id: "retired-agent".to_owned() });
        assert!(state.agent.is_none());
    }

    #[test]
    fn later_step_overwrites_earlier_value() {
        let state = WizardState::default()
            .with_step(&StepData::Description { site_description: "A".to_owned() })
            .with_step(&StepData::Description { site_description: "B".to_owned() });
        assert_eq!(state.site_description.as_deref(), Some("B"));
    }
}
