use crate::error::AppError;
use crate::services::directions::directions_url;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct DirectionsRequest {
    #[serde(default)]
    pub address: String,
}

/// POST /api/get-directions
pub async fn get_directions(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DirectionsRequest>, JsonRejection>,
) -> Json<Value> {
    let result = payload.map_err(AppError::from).and_then(|Json(request)| {
        directions_url(&request.address, state.google_maps_api_key.as_deref())
            .map(|url| (url, request.address))
    });

    match result {
        Ok((url, address)) => Json(json!({
            "success": true,
            "url": url,
            "address": address,
        })),
        Err(e) => {
            e.report("Directions");
            Json(json!({
                "success": false,
                "error": format!("Failed to generate directions: {}", e.user_message()),
            }))
        }
    }
}
