//! The wizard controller: explicit transient state plus background persistence.
//!
//! State is rebuilt wholesale from the store whenever the domain identity
//! changes, then mutated field by field as the user progresses. Every
//! mutation enqueues an asynchronous step write; a lost write is acceptable
//! because the in-memory state remains authoritative for the rest of the
//! run and the next successful write supersedes it.

use std::collections::BTreeMap;
use std::sync::Arc;

use sitepilot_core::{
    agent_by_id, compose_optimizations, domain_from_url, CatalogError, OptimizationReport,
    QuestionType, StepData, WizardState,
};

use crate::error::ServiceError;
use crate::persist::StepQueue;
use crate::session_service::SessionService;

pub struct WizardController {
    sessions: Arc<SessionService>,
    queue: StepQueue,
    domain: Option<String>,
    state: WizardState,
}

impl WizardController {
    #[must_use]
    pub fn new(sessions: Arc<SessionService>) -> Self {
        let queue = StepQueue::spawn(Arc::clone(&sessions));
        Self { sessions, queue, domain: None, state: WizardState::default() }
    }

    #[must_use]
    pub const fn state(&self) -> &WizardState {
        &self.state
    }

    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Set the target URL. A change of domain reconciles state from the
    /// store before the new URL is applied; resuming an interrupted run.
    ///
    /// # Errors
    /// Fails if reconciliation from storage fails.
    pub async fn set_url(&mut self, url: &str) -> Result<(), ServiceError> {
        let domain = domain_from_url(url);
        if self.domain.as_deref() != Some(domain.as_str()) {
            self.state = self.sessions.load_state(&domain).await?;
            self.domain = Some(domain);
        }
        self.apply(StepData::Url { url: url.to_owned() });
        Ok(())
    }

    /// Select an optimization agent by id.
    ///
    /// # Errors
    /// Fails fast on an id that is not in the catalog; a selection surface
    /// offering unknown agents is a programming fault, not user input.
    pub fn choose_agent(&mut self, agent_id: &str) -> Result<(), ServiceError> {
        if agent_by_id(agent_id).is_none() {
            return Err(CatalogError::UnknownAgent(agent_id.to_owned()).into());
        }
        self.apply(StepData::Agent { agent_id: agent_id.to_owned() });
        Ok(())
    }

    pub fn set_description(&mut self, description: &str) {
        self.apply(StepData::Description { site_description: description.to_owned() });
    }

    pub fn set_context(&mut self, context: BTreeMap<QuestionType, Vec<String>>) {
        self.apply(StepData::Context { optimization_context: context });
    }

    /// Compose the selected agent's catalog bundle with the site description
    /// and persist it as the session's optimization result.
    ///
    /// # Errors
    /// Fails if no domain is loaded, no agent is selected, or the durable
    /// write fails.
    pub async fn finalize(&mut self) -> Result<OptimizationReport, ServiceError> {
        let domain = self
            .domain
            .clone()
            .ok_or_else(|| ServiceError::InvalidInput("no URL set".to_owned()))?;
        let agent = self
            .state
            .agent
            .ok_or_else(|| ServiceError::InvalidInput("no agent selected".to_owned()))?;
        let description = self.state.site_description.clone().unwrap_or_default();

        // The result row must attach to the session the background writes
        // created; drain them before looking the session up.
        self.queue.flush().await;

        let report = compose_optimizations(agent.id, &description)?;
        let snapshot = self
            .sessions
            .finalize(
                &domain,
                agent.id,
                report.suggestions.clone(),
                report.performance_metrics.clone(),
            )
            .await?;
        self.state.result = snapshot.optimization_result;
        Ok(report)
    }

    /// Drain outstanding background writes and shut the controller down.
    pub async fn close(self) {
        self.queue.close().await;
    }

    fn apply(&mut self, step: StepData) {
        self.state = std::mem::take(&mut self.state).with_step(&step);
        match &self.domain {
            Some(domain) => self.queue.enqueue(domain, step),
            None => tracing::warn!(
                step_number = step.step_number(),
                "no domain loaded; step kept in memory only"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitepilot_storage::Storage;
    use tempfile::TempDir;

    fn test_sessions() -> (Arc<SessionService>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(&temp_dir.path().join("test.db")).unwrap();
        (Arc::new(SessionService::new(Arc::new(storage))), temp_dir)
    }

    #[tokio::test]
    async fn progress_survives_a_controller_restart() {
        let (sessions, _tmp) = test_sessions();

        let mut wizard = WizardController::new(Arc::clone(&sessions));
        wizard.set_url("https://example.com/landing").await.unwrap();
        wizard.choose_agent("max").unwrap();
        wizard.close().await;

        let mut resumed = WizardController::new(Arc::clone(&sessions));
        resumed.set_url("https://example.com/landing").await.unwrap();

        let state = resumed.state();
        assert_eq!(state.url.as_deref(), Some("https://example.com/landing"));
        assert_eq!(state.agent.map(|a| a.name), Some("Max"));
        assert!(state.site_description.is_none());
        resumed.close().await;
    }

    #[tokio::test]
    async fn domain_change_rebuilds_state_wholesale() {
        let (sessions, _tmp) = test_sessions();

        let mut wizard = WizardController::new(Arc::clone(&sessions));
        wizard.set_url("https://example.com").await.unwrap();
        wizard.set_description("First site");
        wizard.set_url("https://other.example").await.unwrap();

        assert_eq!(wizard.state().url.as_deref(), Some("https://other.example"));
        assert!(wizard.state().site_description.is_none());
        wizard.close().await;
    }

    #[tokio::test]
    async fn unknown_agent_selection_is_rejected() {
        let (sessions, _tmp) = test_sessions();

        let mut wizard = WizardController::new(sessions);
        wizard.set_url("https://example.com").await.unwrap();
        let err = wizard.choose_agent("zed").unwrap_err();
        assert!(matches!(err, ServiceError::Catalog(CatalogError::UnknownAgent(_))));
        wizard.close().await;
    }

    #[tokio::test]
    async fn later_description_overwrites_earlier_write() {
        let (sessions, _tmp) = test_sessions();

        let mut wizard = WizardController::new(Arc::clone(&sessions));
        wizard.set_url("https://example.com").await.unwrap();
        wizard.set_description("A");
        wizard.set_description("B");
        wizard.close().await;

        let (current, _) = sessions.read("example.com").await.unwrap();
        let snapshot = current.unwrap();
        let stored = snapshot.steps.iter().find(|s| s.step_number == 3).unwrap();
        assert_eq!(stored.data, StepData::Description { site_description: "B".to_owned() });
    }

    #[tokio::test]
    async fn finalize_persists_the_composed_report() {
        let (sessions, _tmp) = test_sessions();

        let mut wizard = WizardController::new(Arc::clone(&sessions));
        wizard.set_url("https://example.com").await.unwrap();
        wizard.choose_agent("liv").unwrap();
        wizard.set_description("A flower shop");

        let report = wizard.finalize().await.unwrap();
        assert_eq!(report.suggestions.len(), 3);
        assert!(report.optimized_description.starts_with("A flower shop"));
        assert_eq!(wizard.state().result.as_ref().unwrap().agent_id, "liv");
        wizard.close().await;

        let (current, _) = sessions.read("example.com").await.unwrap();
        let result = current.unwrap().optimization_result.unwrap();
        assert_eq!(result.agent_id, "liv");
        assert_eq!(result.suggestions.len(), 3);
    }

    #[tokio::test]
    async fn finalize_without_agent_fails() {
        let (sessions, _tmp) = test_sessions();

        let mut wizard = WizardController::new(sessions);
        wizard.set_url("https://example.com").await.unwrap();
        let err = wizard.finalize().await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
        wizard.close().await;
    }
}
