use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use sitepilot_core::{SessionSnapshot, StepData};

use crate::api_error::ApiError;
use crate::api_types::{
    ApiResponse, DomainQuery, FinalizeRequest, SessionReadResponse, SessionUpsertRequest,
};
use crate::AppState;

/// `POST /api/session` — get-or-create the domain's session and optionally
/// upsert one step. Returns the fresh snapshot.
pub async fn upsert_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SessionUpsertRequest>,
) -> Result<Json<ApiResponse<SessionSnapshot>>, ApiError> {
    let domain = req.domain.filter(|d| !d.trim().is_empty()).ok_or(ApiError::MissingDomain)?;

    // Validate the payload shape against the claimed step number before
    // anything touches the store.
    let step = match (req.step_number, req.step_data) {
        (Some(number), Some(payload)) => Some(
            StepData::from_parts(number, payload).map_err(|e| ApiError::InvalidStep(e.to_string()))?,
        ),
        _ => None,
    };

    let snapshot = state.sessions.upsert(&domain, step).await?;
    Ok(Json(ApiResponse::ok(snapshot)))
}

/// `GET /api/session?domain=` — current session plus history for a domain.
pub async fn read_session(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DomainQuery>,
) -> Result<Json<ApiResponse<SessionReadResponse>>, ApiError> {
    let domain = query.domain.filter(|d| !d.trim().is_empty()).ok_or(ApiError::MissingDomain)?;

    let (current_session, history) = state.sessions.read(&domain).await?;
    Ok(Json(ApiResponse::ok(SessionReadResponse { current_session, history })))
}

/// `PUT /api/session` — persist an optimization result against the domain's
/// latest session. No session means 404 and no write.
pub async fn finalize_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FinalizeRequest>,
) -> Result<Json<ApiResponse<SessionSnapshot>>, ApiError> {
    let (domain, agent_id) = match (req.domain, req.agent_id) {
        (Some(domain), Some(agent_id))
            if !domain.trim().is_empty() && !agent_id.trim().is_empty() =>
        {
            (domain, agent_id)
        },
        _ => return Err(ApiError::MissingParams("Domain and agent ID")),
    };

    let snapshot =
        state.sessions.finalize(&domain, &agent_id, req.suggestions, req.metrics).await?;
    Ok(Json(ApiResponse::ok(snapshot)))
}
