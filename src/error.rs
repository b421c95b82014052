use axum::extract::rejection::JsonRejection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    /// A required setting is missing; the message is shown as-is
    #[error("{0}")]
    Configuration(String),

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Plain string for direct display in a response body.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Log the failure at the level matching its kind. Called once, where the
    /// error is folded into a response envelope.
    pub fn report(&self, context: &str) {
        match self {
            AppError::InvalidRequest(e) => tracing::debug!("{}: invalid request: {}", context, e),
            AppError::NotFound(e) => tracing::info!("{}: not found: {}", context, e),
            AppError::Unauthorized(e) => tracing::info!("{}: rejected: {}", context, e),
            AppError::Upstream(e) => tracing::warn!("{}: upstream error: {}", context, e),
            AppError::Network(e) => tracing::warn!("{}: network error: {}", context, e),
            AppError::Configuration(e) => {
                tracing::error!("{}: configuration error: {}", context, e)
            }
            AppError::Storage(e) => tracing::error!("{}: storage error: {}", context, e),
            AppError::Internal(e) => tracing::error!("{}: internal error: {}", context, e),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::Network(format!("Request timed out: {}", e))
        } else if e.is_decode() {
            AppError::Upstream(format!("Failed to parse response: {}", e))
        } else {
            AppError::Network(e.to_string())
        }
    }
}

/// Request bodies that fail to decode are folded into the route's envelope
/// like any other validation failure.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Storage(format!("Invalid JSON: {}", e))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
