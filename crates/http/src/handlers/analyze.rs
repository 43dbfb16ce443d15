use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use sitepilot_service::SiteAnalysis;

use crate::api_error::ApiError;
use crate::api_types::{AnalyzeRequest, ApiResponse};
use crate::AppState;

/// `POST /api/analyze` — extract a page and generate its AI description.
pub async fn analyze_website(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<ApiResponse<SiteAnalysis>>, ApiError> {
    let url = req.url.filter(|u| !u.trim().is_empty()).ok_or(ApiError::MissingUrl)?;

    let analysis = state.analyzer.analyze(&url).await.map_err(ApiError::AnalysisFailed)?;
    Ok(Json(ApiResponse::ok(analysis)))
}
