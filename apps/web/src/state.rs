use std::sync::Arc;

use crate::analysis_client::AnalysisService;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-user data: every submission builds its own `UploadForm`.
#[derive(Clone)]
pub struct AppState {
    /// Backend used by every form. `AnalysisClient` in production.
    pub analysis: Arc<dyn AnalysisService>,
    pub config: Config,
}
