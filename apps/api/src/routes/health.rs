use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::llm_client::MODEL;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "coverly-api"
    }))
}

/// GET /api/health
/// Component readiness for the pipeline and the letter writer.
pub async fn api_health_handler(State(state): State<AppState>) -> Json<Value> {
    let taxonomy_status = if state.taxonomy.is_empty() { "empty" } else { "ready" };

    Json(json!({
        "status": "operational",
        "components": {
            "document_extraction": "ready",
            "skill_taxonomy": taxonomy_status,
            "letter_writer": "ready"
        },
        "taxonomy_skills": state.taxonomy.len(),
        "model": MODEL,
        "max_upload_bytes": state.config.max_upload_bytes
    }))
}
