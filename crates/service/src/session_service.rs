use std::sync::Arc;

use sitepilot_core::{
    MetricMap, OptimizationSuggestion, SessionRecord, SessionSnapshot, StepData, WizardState,
};
use sitepilot_storage::SessionStore;

use crate::error::ServiceError;

/// Session operations over the durable store.
///
/// Every method is an independent, stateless round trip; there is no
/// cross-step atomicity. Concurrent upserts for one domain may create two
/// session rows — the most recently created wins and the rest stay visible
/// through history only.
pub struct SessionService {
    storage: Arc<dyn SessionStore>,
}

impl SessionService {
    #[must_use]
    pub fn new(storage: Arc<dyn SessionStore>) -> Self {
        Self { storage }
    }

    /// Latest session for a domain, creating one on first contact, with an
    /// optional step write folded in. Returns the fresh snapshot.
    ///
    /// # Errors
    /// Fails on an empty domain or any storage failure.
    pub async fn upsert(
        &self,
        domain: &str,
        step: Option<StepData>,
    ) -> Result<SessionSnapshot, ServiceError> {
        let domain = require_domain(domain)?;

        let session_id = match self.storage.get_latest(domain).await? {
            Some(snapshot) => snapshot.id,
            None => self.storage.create_session(domain).await?,
        };

        if let Some(step) = step {
            self.storage.upsert_step(session_id, &step).await?;
        }

        self.current_snapshot(domain).await
    }

    /// Current session and full history for a domain. A domain with no
    /// sessions yields `(None, [])` — not an error.
    ///
    /// # Errors
    /// Fails on an empty domain or any storage failure.
    pub async fn read(
        &self,
        domain: &str,
    ) -> Result<(Option<SessionSnapshot>, Vec<SessionRecord>), ServiceError> {
        let domain = require_domain(domain)?;
        let current = self.storage.get_latest(domain).await?;
        let history = self.storage.get_history(domain).await?;
        Ok((current, history))
    }

    /// Append an optimization result to the domain's latest session.
    ///
    /// # Errors
    /// Fails with [`ServiceError::SessionNotFound`] — performing no write —
    /// when the domain has no session.
    pub async fn finalize(
        &self,
        domain: &str,
        agent_id: &str,
        suggestions: Vec<OptimizationSuggestion>,
        metrics: MetricMap,
    ) -> Result<SessionSnapshot, ServiceError> {
        let domain = require_domain(domain)?;
        let snapshot = self
            .storage
            .get_latest(domain)
            .await?
            .ok_or_else(|| ServiceError::SessionNotFound { domain: domain.to_owned() })?;

        self.storage.append_result(snapshot.id, agent_id, &suggestions, &metrics).await?;
        self.current_snapshot(domain).await
    }

    /// Write one step against the domain's latest session, creating the
    /// session if the background write arrives before any foreground upsert.
    ///
    /// # Errors
    /// Fails on an empty domain or any storage failure.
    pub async fn record_step(&self, domain: &str, step: &StepData) -> Result<(), ServiceError> {
        let domain = require_domain(domain)?;
        let session_id = match self.storage.get_latest(domain).await? {
            Some(snapshot) => snapshot.id,
            None => self.storage.create_session(domain).await?,
        };
        self.storage.upsert_step(session_id, step).await?;
        Ok(())
    }

    /// Reconcile transient wizard state from the domain's latest session.
    /// An unknown domain yields the default (empty) state.
    ///
    /// # Errors
    /// Fails on an empty domain or any storage failure.
    pub async fn load_state(&self, domain: &str) -> Result<WizardState, ServiceError> {
        let domain = require_domain(domain)?;
        Ok(self
            .storage
            .get_latest(domain)
            .await?
            .map(|snapshot| WizardState::from_snapshot(&snapshot))
            .unwrap_or_default())
    }

    async fn current_snapshot(&self, domain: &str) -> Result<SessionSnapshot, ServiceError> {
        self.storage
            .get_latest(domain)
            .await?
            .ok_or_else(|| ServiceError::SessionNotFound { domain: domain.to_owned() })
    }
}

fn require_domain(domain: &str) -> Result<&str, ServiceError> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidInput("domain is required".to_owned()));
    }
    Ok(trimmed)
}
