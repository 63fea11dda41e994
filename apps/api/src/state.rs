use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::session::SessionSlot;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The current résumé. Replaced on every upload.
    pub sessions: SessionSlot,
    /// Pluggable analyzer. Default: KeywordAnalyzer. Swap via ANALYZER_BACKEND.
    pub analyzer: Arc<dyn Analyzer>,
}

impl AppState {
    pub fn new(config: Config, analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            config,
            sessions: SessionSlot::new(),
            analyzer,
        }
    }
}
