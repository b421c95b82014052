use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /health - Check that the user store is readable
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut status = json!({
        "status": "ok",
        "checks": {}
    });

    match state.users.count().await {
        Ok(count) => {
            status["checks"]["user_store"] = json!("ok");
            status["checks"]["user_count"] = json!(count);
        }
        Err(e) => {
            status["checks"]["user_store"] = json!({"error": e.to_string()});
            status["status"] = json!("error");
        }
    }

    Json(status)
}
