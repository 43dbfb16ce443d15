use std::str::FromStr as _;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use sitepilot_core::QuestionType;
use sitepilot_llm::SuggestionContext;

use crate::api_error::ApiError;
use crate::api_types::{ApiResponse, SuggestionsRequest, SuggestionsResponse};
use crate::AppState;

/// `POST /api/suggestions` — a validated batch of exactly 3 (or 0) short
/// suggestions for one question type.
///
/// Pipeline failures are not request failures: an external outage degrades
/// to an empty list so the wizard is never blocked.
pub async fn get_suggestions(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SuggestionsRequest>,
) -> Result<Json<ApiResponse<SuggestionsResponse>>, ApiError> {
    let (raw_type, url) = match (req.question_type, req.url) {
        (Some(question_type), Some(url)) if !url.trim().is_empty() => (question_type, url),
        _ => return Err(ApiError::MissingParams("Question type and URL")),
    };

    let question_type =
        QuestionType::from_str(&raw_type).map_err(|_| ApiError::InvalidQuestionType(raw_type))?;

    let ctx = SuggestionContext { url, website_info: req.website_info };
    let suggestions = state.generator.generate(question_type, &ctx).await;
    Ok(Json(ApiResponse::ok(SuggestionsResponse { suggestions })))
}
