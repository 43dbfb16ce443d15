//! Business logic layer for sitepilot
//!
//! Sits between the HTTP/CLI surfaces and the storage/LLM/extraction
//! clients: session operations, optimization finalization, the wizard
//! reconciler, and fire-and-forget step persistence.

mod analyzer;
mod error;
mod persist;
mod session_service;
mod wizard;

pub use analyzer::{SiteAnalysis, SiteAnalyzer};
pub use error::ServiceError;
pub use persist::StepQueue;
pub use session_service::SessionService;
pub use wizard::WizardController;
