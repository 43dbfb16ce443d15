//! Typed API error for HTTP handlers.
//!
//! Converts domain errors into the response envelope the wizard client
//! consumes: `{"success": false, "error": {"message", "code"}}` with a
//! stable error code per failure mode.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use sitepilot_service::ServiceError;

/// API error with HTTP status, stable code, and human-readable message.
///
/// Use via `Result<Json<T>, ApiError>` in handlers. The `Internal` variants
/// log the real error server-side and return a static message to the client.
#[derive(Debug)]
pub enum ApiError {
    /// 400 — `domain` missing from a session request.
    MissingDomain,
    /// 400 — required request fields missing.
    MissingParams(&'static str),
    /// 400 — `url` missing from an analyze request.
    MissingUrl,
    /// 400 — `questionType` is not one of the enumerated values.
    InvalidQuestionType(String),
    /// 400 — step number/payload failed validation.
    InvalidStep(String),
    /// 404 — finalize against a domain with no session.
    SessionNotFound(String),
    /// 500 — session operation failed unexpectedly.
    SessionError(ServiceError),
    /// 500 — analyze flow failed (extraction or description).
    AnalysisFailed(ServiceError),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::MissingDomain => {
                (StatusCode::BAD_REQUEST, "MISSING_DOMAIN", "Domain is required".to_owned())
            },
            Self::MissingParams(what) => {
                (StatusCode::BAD_REQUEST, "MISSING_PARAMS", format!("{what} are required"))
            },
            Self::MissingUrl => {
                (StatusCode::BAD_REQUEST, "MISSING_URL", "URL is required".to_owned())
            },
            Self::InvalidQuestionType(_) => (
                StatusCode::BAD_REQUEST,
                "INVALID_QUESTION_TYPE",
                "Invalid question type".to_owned(),
            ),
            Self::InvalidStep(msg) => (StatusCode::BAD_REQUEST, "INVALID_STEP", msg.clone()),
            Self::SessionNotFound(_) => {
                (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", "Session not found".to_owned())
            },
            Self::SessionError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SESSION_ERROR",
                "Failed to handle session".to_owned(),
            ),
            Self::AnalysisFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "ANALYSIS_FAILED",
                "Failed to analyze website".to_owned(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::SessionError(err) | Self::AnalysisFailed(err) => {
                tracing::error!(error = ?err, "request failed");
            },
            Self::InvalidQuestionType(value) => {
                tracing::debug!(value = %value, "rejected question type");
            },
            _ => {},
        }
        let (status, code, message) = self.parts();
        let body = serde_json::json!({
            "success": false,
            "error": { "message": message, "code": code }
        });
        (status, Json(body)).into_response()
    }
}

/// Service failures on the session routes map to the session taxonomy;
/// analyze handlers wrap errors in `AnalysisFailed` themselves.
impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::SessionNotFound { domain } => Self::SessionNotFound(domain),
            ServiceError::Step(step_err) => Self::InvalidStep(step_err.to_string()),
            ServiceError::InvalidInput(_) => Self::MissingDomain,
            _ => Self::SessionError(err),
        }
    }
}
