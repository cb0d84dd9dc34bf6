use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": env!("CARGO_PKG_NAME"),
        "active_analyses": state.analyses.len().await
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::resume::analysis::tests::ScriptedGenerator;

    use super::*;

    #[tokio::test]
    async fn test_health_reports_service() {
        let state = AppState::for_tests(Arc::new(ScriptedGenerator::new(&[])));
        let Json(body) = health_handler(State(state)).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "devboard-api");
        assert_eq!(body["active_analyses"], 0);
    }
}
