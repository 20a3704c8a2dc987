//! Character API routes

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::dto::{
    parse_class, parse_element, CharacterListResponseDto, CharacterResponseDto,
    CreateCharacterRequestDto, CreatedCharacterResponseDto, HeroesResponseDto,
};
use crate::application::ports::outbound::CharacterFilter;
use crate::application::services::{CharacterService, CreateCharacterRequest};
use crate::domain::value_objects::CharacterId;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCharactersQuery {
    #[serde(default)]
    class: Option<String>,
    /// Kept as a string so a non-numeric value is ignored, not rejected
    #[serde(default)]
    min_level: Option<String>,
    #[serde(default)]
    element: Option<String>,
}

/// List characters with optional class/minLevel/element filters
pub async fn list_characters(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListCharactersQuery>,
) -> Result<Json<CharacterListResponseDto>, ApiError> {
    let mut filter = CharacterFilter::default();

    // A filter naming an unknown class or element matches nothing.
    if let Some(class) = query.class.as_deref() {
        match parse_class(class) {
            Some(class) => filter.class = Some(class),
            None => {
                return Ok(Json(CharacterListResponseDto {
                    count: 0,
                    characters: Vec::new(),
                }))
            }
        }
    }
    if let Some(element) = query.element.as_deref() {
        match parse_element(element) {
            Some(element) => filter.element = Some(element),
            None => {
                return Ok(Json(CharacterListResponseDto {
                    count: 0,
                    characters: Vec::new(),
                }))
            }
        }
    }
    filter.min_level = query.min_level.as_deref().and_then(|v| v.parse().ok());

    let characters = state.character_service.list_characters(filter).await?;
    let characters: Vec<CharacterResponseDto> =
        characters.into_iter().map(CharacterResponseDto::from).collect();
    Ok(Json(CharacterListResponseDto {
        count: characters.len(),
        characters,
    }))
}

/// Create a character (enters the pending moderation queue)
pub async fn create_character(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCharacterRequestDto>,
) -> Result<(StatusCode, Json<CreatedCharacterResponseDto>), ApiError> {
    let class = parse_class(&req.class)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown class: {}", req.class)))?;
    let element = parse_element(&req.element)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown element: {}", req.element)))?;

    let created = state
        .character_service
        .create_character(CreateCharacterRequest {
            name: req.name,
            class,
            element,
            level: req.level,
            stats: req.base_stats,
            equipment: req.equipment,
            skills: req.skills,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedCharacterResponseDto::from(created)),
    ))
}

/// Get a character by ID
pub async fn get_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CharacterResponseDto>, ApiError> {
    let uuid = Uuid::parse_str(&id)
        .map_err(|_| ApiError::BadRequest("Invalid character ID".to_string()))?;

    let character = state
        .character_service
        .get_character(CharacterId::from_uuid(uuid))
        .await?
        .ok_or_else(|| ApiError::NotFound("Character not found".to_string()))?;

    Ok(Json(CharacterResponseDto::from(character)))
}

/// List the heroes board: approved, locked characters
pub async fn list_heroes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HeroesResponseDto>, ApiError> {
    let heroes = state.character_service.list_heroes().await?;
    let heroes: Vec<CharacterResponseDto> =
        heroes.into_iter().map(CharacterResponseDto::from).collect();
    Ok(Json(HeroesResponseDto {
        count: heroes.len(),
        heroes,
    }))
}
