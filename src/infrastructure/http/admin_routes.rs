//! Admin moderation routes, gated by a bearer token

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::application::dto::{
    ApproveCharacterRequestDto, CharacterResponseDto, PendingCharacterDto, PendingListResponseDto,
};
use crate::application::services::CharacterService;
use crate::domain::value_objects::CharacterId;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::state::AppState;

fn authorize(headers: &HeaderMap, state: &AppState) -> Result<(), ApiError> {
    let expected = format!("Bearer {}", state.config.admin_token);
    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if provided == Some(expected.as_str()) {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

fn parse_character_id(value: &str) -> Result<CharacterId, ApiError> {
    Uuid::parse_str(value)
        .map(CharacterId::from_uuid)
        .map_err(|_| ApiError::BadRequest("Invalid character ID".to_string()))
}

/// List characters awaiting approval (expired ones are purged first)
pub async fn list_pending(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<PendingListResponseDto>, ApiError> {
    authorize(&headers, &state)?;

    let pending = state.character_service.list_pending().await?;
    let pending: Vec<PendingCharacterDto> =
        pending.into_iter().map(PendingCharacterDto::from).collect();
    Ok(Json(PendingListResponseDto {
        count: pending.len(),
        pending,
    }))
}

/// Approve a pending character onto the heroes board
pub async fn approve_character(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Option<Json<ApproveCharacterRequestDto>>,
) -> Result<Json<Value>, ApiError> {
    authorize(&headers, &state)?;

    let id = parse_character_id(&id)?;
    let message = body
        .and_then(|Json(req)| req.commemoration_message)
        .unwrap_or_default();

    let character = state.character_service.approve_character(id, message).await?;
    Ok(Json(json!({
        "success": true,
        "character": CharacterResponseDto::from(character),
    })))
}

/// Delete a pending character
pub async fn delete_pending(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    authorize(&headers, &state)?;

    let id = parse_character_id(&id)?;
    state.character_service.delete_pending(id).await?;
    Ok(Json(json!({ "success": true })))
}
