//! Battle API routes

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::application::dto::{
    BattleHistoryResponseDto, BattleOutcomeResponseDto, BattleSummaryDto, ResolveBattleRequestDto,
};
use crate::application::services::{BattleService, ResolveBattleRequest};
use crate::domain::value_objects::CharacterId;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::state::AppState;

fn parse_character_id(value: &str) -> Result<CharacterId, ApiError> {
    Uuid::parse_str(value)
        .map(CharacterId::from_uuid)
        .map_err(|_| ApiError::BadRequest(format!("Invalid character ID: {value}")))
}

/// Resolve damage between two characters and record the battle
pub async fn resolve_battle(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResolveBattleRequestDto>,
) -> Result<Json<BattleOutcomeResponseDto>, ApiError> {
    let (attacker_id, defender_id) = match (req.attacker_id.as_deref(), req.defender_id.as_deref())
    {
        (Some(attacker), Some(defender)) if !attacker.is_empty() && !defender.is_empty() => {
            (attacker, defender)
        }
        _ => {
            return Err(ApiError::BadRequest(
                "attackerId and defenderId are required".to_string(),
            ))
        }
    };

    let outcome = state
        .battle_service
        .resolve(ResolveBattleRequest {
            attacker_id: parse_character_id(attacker_id)?,
            defender_id: parse_character_id(defender_id)?,
            skill_name: req.skill_name,
            is_critical: req.is_critical,
        })
        .await?;

    Ok(Json(BattleOutcomeResponseDto::from(outcome)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleHistoryQuery {
    #[serde(default)]
    character_id: Option<String>,
    /// Kept as a string so a non-numeric value falls back to the default
    #[serde(default)]
    limit: Option<String>,
}

/// List recent battles, optionally for one character
pub async fn battle_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BattleHistoryQuery>,
) -> Result<Json<BattleHistoryResponseDto>, ApiError> {
    let character_id = query
        .character_id
        .as_deref()
        .map(parse_character_id)
        .transpose()?;
    let limit = query.limit.as_deref().and_then(|v| v.parse::<i64>().ok());

    let battles = state.battle_service.history(character_id, limit).await?;
    let battles: Vec<BattleSummaryDto> =
        battles.into_iter().map(BattleSummaryDto::from).collect();
    Ok(Json(BattleHistoryResponseDto {
        total: battles.len(),
        battles,
    }))
}
