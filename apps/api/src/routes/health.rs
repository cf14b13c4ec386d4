use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a status object with service version and whether the reference document loaded.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let corpus = if state.orchestrator.corpus().is_placeholder() {
        "placeholder"
    } else {
        "loaded"
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "advisor-api",
        "corpus": corpus
    }))
}
