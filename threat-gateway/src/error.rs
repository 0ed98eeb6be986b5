//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;
use threat_core::ThreatError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Resource errors
    #[error("{0}")]
    NotFound(String),

    // Validation errors
    #[error("{0}")]
    ValidationError(String),

    #[error("Invalid threat payload: missing {}", .missing.join(", "))]
    InvalidPayload { missing: Vec<String> },

    // Agent errors
    #[error("Agent error: {0}")]
    AgentError(String),

    // Generic errors
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidPayload { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::AgentError(msg) => {
                tracing::error!("Agent error: {}", msg);
                (StatusCode::BAD_GATEWAY, "Agent error".to_string())
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let mut body = json!({
            "error": error_message,
            "status": status.as_u16()
        });
        if let AppError::InvalidPayload { missing } = &self {
            body["missing"] = json!(missing);
        }

        (status, Json(body)).into_response()
    }
}

impl From<ThreatError> for AppError {
    fn from(err: ThreatError) -> Self {
        match err {
            ThreatError::InvalidPayload { missing } => AppError::InvalidPayload { missing },
            other => AppError::ValidationError(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
