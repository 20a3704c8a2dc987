//! Battle DTOs

use serde::{Deserialize, Serialize};

use crate::application::services::{BattleOutcome, BattleSummary, CombatantSummary};
use crate::domain::combat::DamageResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveBattleRequestDto {
    #[serde(default)]
    pub attacker_id: Option<String>,
    #[serde(default)]
    pub defender_id: Option<String>,
    #[serde(default)]
    pub skill_name: Option<String>,
    #[serde(default)]
    pub is_critical: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantDto {
    pub id: String,
    pub name: String,
    pub level: i32,
}

impl From<CombatantSummary> for CombatantDto {
    fn from(s: CombatantSummary) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name,
            level: s.level,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleOutcomeResponseDto {
    pub attacker: CombatantDto,
    pub defender: CombatantDto,
    pub result: DamageResult,
    pub battle_id: i64,
}

impl From<BattleOutcome> for BattleOutcomeResponseDto {
    fn from(outcome: BattleOutcome) -> Self {
        Self {
            attacker: outcome.attacker.into(),
            defender: outcome.defender.into(),
            result: outcome.result,
            battle_id: outcome.battle_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleParticipantDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleSummaryDto {
    pub id: i64,
    pub attacker: BattleParticipantDto,
    pub defender: BattleParticipantDto,
    pub final_damage: i64,
    pub is_critical: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl From<BattleSummary> for BattleSummaryDto {
    fn from(s: BattleSummary) -> Self {
        Self {
            id: s.id,
            attacker: BattleParticipantDto {
                id: s.attacker_id.to_string(),
                name: s.attacker_name,
            },
            defender: BattleParticipantDto {
                id: s.defender_id.to_string(),
                name: s.defender_name,
            },
            final_damage: s.final_damage,
            is_critical: s.is_critical,
            timestamp: s.timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleHistoryResponseDto {
    pub total: usize,
    pub battles: Vec<BattleSummaryDto>,
}
