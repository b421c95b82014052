pub mod appointments;
pub mod auth;
pub mod chat;
pub mod directions;
pub mod health;
pub mod search;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chat", post(chat::health_chat))
        .route("/counselor", post(chat::counselor_chat))
        .route("/api/search-nearby", post(search::search_nearby))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/user/{phone}", get(auth::get_user))
        .route(
            "/api/schedule-appointment",
            post(appointments::schedule_appointment),
        )
        .route("/api/get-directions", post(directions::get_directions))
        .route("/health", get(health::health_check))
        .with_state(state)
}
