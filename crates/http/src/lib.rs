//! HTTP API server for sitepilot.

pub mod api_error;
mod api_types;
mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use sitepilot_llm::SuggestionGenerator;
use sitepilot_service::{SessionService, SiteAnalyzer};

pub use api_types::VersionResponse;

/// Shared application state for all HTTP handlers.
///
/// Wrapped in `Arc` for thread-safe sharing across handlers.
pub struct AppState {
    /// Session store operations
    pub sessions: Arc<SessionService>,
    /// Suggestion generation pipeline
    pub generator: Arc<SuggestionGenerator>,
    /// Content extraction + description flow
    pub analyzer: Arc<SiteAnalyzer>,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route(
            "/api/session",
            post(handlers::session::upsert_session)
                .get(handlers::session::read_session)
                .put(handlers::session::finalize_session),
        )
        .route("/api/suggestions", post(handlers::suggestions::get_suggestions))
        .route("/api/analyze", post(handlers::analyze::analyze_website))
        .route("/api/wizard", get(handlers::wizard::get_wizard_state))
        // The wizard UI is a browser client on another origin.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
