use crate::error::AppError;
use crate::models::{LoginRequest, PublicUser, RegisterRequest};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicUser>,
}

impl AuthResponse {
    fn ok(message: &str, user: Option<PublicUser>) -> Self {
        AuthResponse {
            success: true,
            message: Some(message.to_string()),
            user,
        }
    }

    fn failed(error: AppError, context: &str) -> Self {
        error.report(context);
        AuthResponse {
            success: false,
            message: Some(error.user_message()),
            user: None,
        }
    }
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Json<AuthResponse> {
    let result = match payload {
        Ok(Json(request)) => state.users.register(&request).await,
        Err(rejection) => Err(AppError::from(rejection)),
    };
    let response = match result {
        Ok(()) => AuthResponse::ok("Registration successful! You can now login.", None),
        Err(e) => AuthResponse::failed(e, "Registration"),
    };
    Json(response)
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Json<AuthResponse> {
    let result = match payload {
        Ok(Json(request)) => state.users.login(&request).await,
        Err(rejection) => Err(AppError::from(rejection)),
    };
    let response = match result {
        Ok(user) => AuthResponse::ok("Login successful!", Some(user)),
        Err(e) => AuthResponse::failed(e, "Login"),
    };
    Json(response)
}

/// GET /api/auth/user/{phone}
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(phone): Path<String>,
) -> Json<AuthResponse> {
    let response = match state.users.lookup(&phone).await {
        Ok(Some(user)) => AuthResponse {
            success: true,
            message: None,
            user: Some(user),
        },
        Ok(None) => {
            AuthResponse::failed(AppError::NotFound("User not found".to_string()), "User lookup")
        }
        Err(e) => AuthResponse::failed(e, "User lookup"),
    };
    Json(response)
}
