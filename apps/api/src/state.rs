use std::sync::Arc;

use crate::advisor::orchestrator::RequestOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup; owns the read-only grounding corpus.
    pub orchestrator: Arc<RequestOrchestrator>,
}
