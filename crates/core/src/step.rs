use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::question::QuestionType;

/// Payload of a single wizard step.
///
/// Each of the four steps has a fixed shape; the variant carries the wire
/// field names the browser client sends. Validation of an incoming
/// `(stepNumber, payload)` pair happens in [`StepData::from_parts`] so
/// malformed or mismatched payloads never reach the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StepData {
    Url {
        url: String,
    },
    Agent {
        #[serde(rename = "agentId")]
        agent_id: String,
    },
    Description {
        #[serde(rename = "siteDescription")]
        site_description: String,
    },
    Context {
        #[serde(rename = "optimizationContext")]
        optimization_context: BTreeMap<QuestionType, Vec<String>>,
    },
}

/// First wizard step number.
pub const FIRST_STEP: u8 = 1;
/// Last wizard step number.
pub const LAST_STEP: u8 = 4;

impl StepData {
    /// The wizard step this payload belongs to.
    #[must_use]
    pub const fn step_number(&self) -> u8 {
        match self {
            Self::Url { .. } => 1,
            Self::Agent { .. } => 2,
            Self::Description { .. } => 3,
            Self::Context { .. } => 4,
        }
    }

    /// Validate an incoming step payload against its claimed step number.
    ///
    /// # Errors
    /// Returns an error if the number is outside 1..=4, the payload does not
    /// deserialize into any step shape, or it deserializes into the shape of
    /// a different step.
    pub fn from_parts(step_number: u8, payload: serde_json::Value) -> Result<Self, StepError> {
        if !(FIRST_STEP..=LAST_STEP).contains(&step_number) {
            return Err(StepError::InvalidStepNumber(step_number));
        }
        let step: Self = serde_json::from_value(payload)
            .map_err(|source| StepError::InvalidPayload { step_number, source })?;
        if step.step_number() != step_number {
            return Err(StepError::ShapeMismatch { expected: step_number, actual: step.step_number() });
        }
        Ok(step)
    }
}

/// Errors raised while validating step payloads at the store boundary.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("step number {0} is out of range (expected 1-4)")]
    InvalidStepNumber(u8),

    #[error("step {step_number} payload is invalid: {source}")]
    InvalidPayload {
        step_number: u8,
        #[source]
        source: serde_json::Error,
    },

    #[error("payload has the shape of step {actual}, not step {expected}")]
    ShapeMismatch { expected: u8, actual: u8 },
}
