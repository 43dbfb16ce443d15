use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use sitepilot_core::WizardState;

use crate::api_error::ApiError;
use crate::api_types::{ApiResponse, DomainQuery};
use crate::AppState;

/// `GET /api/wizard?domain=` — the reconciled wizard state for a domain.
///
/// Replays the latest session's stored steps in ascending order; a domain
/// with no sessions yields the empty state.
pub async fn get_wizard_state(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DomainQuery>,
) -> Result<Json<ApiResponse<WizardState>>, ApiError> {
    let domain = query.domain.filter(|d| !d.trim().is_empty()).ok_or(ApiError::MissingDomain)?;

    let wizard_state = state.sessions.load_state(&domain).await?;
    Ok(Json(ApiResponse::ok(wizard_state)))
}
