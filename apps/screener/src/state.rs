use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::AnalysisService;
use crate::storage::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; per-request data lives in `ScreeningSession`.
#[derive(Clone)]
pub struct AppState {
    /// The Gemini client in production, a stub in tests.
    pub analysis: Arc<dyn AnalysisService>,
    /// Present only when a bucket is configured.
    pub store: Option<ResumeStore>,
    pub config: Config,
}
