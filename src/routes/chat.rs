use crate::error::AppError;
use crate::services::chat::Persona;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    #[serde(rename = "type")]
    pub persona: Persona,
}

/// Relay failures come back as a normal reply so the chat UI keeps working.
async fn relay(
    state: &AppState,
    persona: Persona,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Json<ChatResponse> {
    let result = match payload {
        Ok(Json(request)) => state.chat.relay(persona, &request.message).await,
        Err(rejection) => Err(AppError::from(rejection)),
    };

    let reply = match result {
        Ok(text) => text,
        Err(e) => {
            e.report("Chat relay");
            format!("Error: {}", e.user_message())
        }
    };

    Json(ChatResponse { reply, persona })
}

/// POST /chat
pub async fn health_chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Json<ChatResponse> {
    relay(&state, Persona::Health, payload).await
}

/// POST /counselor
pub async fn counselor_chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Json<ChatResponse> {
    relay(&state, Persona::Counselor, payload).await
}
