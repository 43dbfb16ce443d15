//! Request and response shapes for the JSON API.

use serde::{Deserialize, Serialize};
use sitepilot_core::{MetricMap, OptimizationSuggestion, SessionRecord, SessionSnapshot, WebsiteInfo};

/// Success envelope: `{"success": true, "data": ...}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub const fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpsertRequest {
    pub domain: Option<String>,
    pub step_number: Option<u8>,
    pub step_data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct DomainQuery {
    pub domain: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReadResponse {
    pub current_session: Option<SessionSnapshot>,
    pub history: Vec<SessionRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeRequest {
    pub domain: Option<String>,
    pub agent_id: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<OptimizationSuggestion>,
    #[serde(default)]
    pub metrics: MetricMap,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsRequest {
    pub question_type: Option<String>,
    pub url: Option<String>,
    pub website_info: Option<WebsiteInfo>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}
