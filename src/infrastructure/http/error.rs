//! API error taxonomy
//!
//! Every handler funnels failures through `ApiError`. Internal errors are
//! logged with full detail and surfaced to the caller as an opaque body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::application::services::{BattleServiceError, CharacterServiceError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, label, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
                "A valid bearer token is required".to_string(),
            ),
            ApiError::Internal(err) => {
                tracing::error!("Internal server error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": label, "message": message }))).into_response()
    }
}

impl From<CharacterServiceError> for ApiError {
    fn from(err: CharacterServiceError) -> Self {
        match err {
            CharacterServiceError::Invalid(msg) => ApiError::BadRequest(msg),
            CharacterServiceError::NotFound(_) => {
                ApiError::NotFound("Character not found or not pending".to_string())
            }
            CharacterServiceError::Internal(err) => ApiError::Internal(err),
        }
    }
}

impl From<BattleServiceError> for ApiError {
    fn from(err: BattleServiceError) -> Self {
        match err {
            BattleServiceError::CharacterNotFound(_) => {
                ApiError::NotFound("One or both characters not found".to_string())
            }
            BattleServiceError::Internal(err) => ApiError::Internal(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_service_errors_to_statuses() {
        use crate::domain::value_objects::CharacterId;

        let err: ApiError = CharacterServiceError::Invalid("bad".into()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));

        let err: ApiError = BattleServiceError::CharacterNotFound(CharacterId::new()).into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
