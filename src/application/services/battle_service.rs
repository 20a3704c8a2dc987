//! Battle Service - resolves damage requests and records battle history
//!
//! The service owns everything around the pure calculator: loading the two
//! combatants, deciding the critical flag, and appending the outcome to
//! the battle log. The calculator itself stays free of I/O.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::application::ports::outbound::{
    BattleLogPort, CharacterRepositoryPort, RandomSourcePort,
};
use crate::domain::combat::{self, DamageResult};
use crate::domain::value_objects::{BattleId, CharacterId};

/// Request to resolve one exchange
#[derive(Debug, Clone)]
pub struct ResolveBattleRequest {
    pub attacker_id: CharacterId,
    pub defender_id: CharacterId,
    /// Reserved for skill-specific modifiers; currently ignored
    pub skill_name: Option<String>,
    /// When present, overrides the critical roll
    pub is_critical: Option<bool>,
}

/// Lightweight combatant summary for responses
#[derive(Debug, Clone)]
pub struct CombatantSummary {
    pub id: CharacterId,
    pub name: String,
    pub level: i32,
}

/// A resolved and recorded battle
#[derive(Debug, Clone)]
pub struct BattleOutcome {
    pub attacker: CombatantSummary,
    pub defender: CombatantSummary,
    pub result: DamageResult,
    pub battle_id: BattleId,
}

/// One battle-history entry with participant names resolved
#[derive(Debug, Clone)]
pub struct BattleSummary {
    pub id: BattleId,
    pub attacker_id: CharacterId,
    pub attacker_name: String,
    pub defender_id: CharacterId,
    pub defender_name: String,
    pub final_damage: i64,
    pub is_critical: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Errors surfaced by the battle service
#[derive(Debug, thiserror::Error)]
pub enum BattleServiceError {
    #[error("character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// History listing defaults to 10 entries and is capped at 50
pub const DEFAULT_HISTORY_LIMIT: i64 = 10;
pub const MAX_HISTORY_LIMIT: i64 = 50;

/// Battle service trait defining the application use cases
#[async_trait]
pub trait BattleService: Send + Sync {
    /// Resolve damage between two stored characters and record the result
    async fn resolve(&self, request: ResolveBattleRequest)
        -> Result<BattleOutcome, BattleServiceError>;

    /// Recent battles, newest first
    async fn history(
        &self,
        character_id: Option<CharacterId>,
        limit: Option<i64>,
    ) -> Result<Vec<BattleSummary>, BattleServiceError>;
}

/// Default battle service backed by the repository and log ports
pub struct BattleServiceImpl {
    characters: Arc<dyn CharacterRepositoryPort>,
    battles: Arc<dyn BattleLogPort>,
    random: Arc<dyn RandomSourcePort>,
}

impl BattleServiceImpl {
    pub fn new(
        characters: Arc<dyn CharacterRepositoryPort>,
        battles: Arc<dyn BattleLogPort>,
        random: Arc<dyn RandomSourcePort>,
    ) -> Self {
        Self {
            characters,
            battles,
            random,
        }
    }
}

#[async_trait]
impl BattleService for BattleServiceImpl {
    #[instrument(skip(self), fields(attacker = %request.attacker_id, defender = %request.defender_id))]
    async fn resolve(
        &self,
        request: ResolveBattleRequest,
    ) -> Result<BattleOutcome, BattleServiceError> {
        let attacker = self
            .characters
            .get(request.attacker_id)
            .await
            .context("Failed to load attacker")?
            .ok_or(BattleServiceError::CharacterNotFound(request.attacker_id))?;
        let defender = self
            .characters
            .get(request.defender_id)
            .await
            .context("Failed to load defender")?
            .ok_or(BattleServiceError::CharacterNotFound(request.defender_id))?;

        // Explicit override wins; otherwise roll against 0.15 + luck/1000.
        let is_critical = match request.is_critical {
            Some(forced) => forced,
            None => self.random.next_unit() < combat::critical_chance(attacker.stats.luck),
        };
        if let Some(skill) = &request.skill_name {
            debug!(skill, "Skill modifiers are not applied yet");
        }

        let result = combat::calculate(&attacker, &defender, is_critical);

        let battle_id = self
            .battles
            .append(attacker.id, defender.id, &result)
            .await
            .context("Failed to record battle")?;

        info!(
            battle_id,
            final_damage = result.final_damage,
            is_critical = result.is_critical,
            "{} hit {} for {}",
            attacker.name,
            defender.name,
            result.final_damage
        );

        Ok(BattleOutcome {
            attacker: CombatantSummary {
                id: attacker.id,
                name: attacker.name,
                level: attacker.level,
            },
            defender: CombatantSummary {
                id: defender.id,
                name: defender.name,
                level: defender.level,
            },
            result,
            battle_id,
        })
    }

    #[instrument(skip(self))]
    async fn history(
        &self,
        character_id: Option<CharacterId>,
        limit: Option<i64>,
    ) -> Result<Vec<BattleSummary>, BattleServiceError> {
        // A missing or non-positive limit falls back to the default.
        let limit = match limit {
            Some(value) if value > 0 => value.min(MAX_HISTORY_LIMIT),
            _ => DEFAULT_HISTORY_LIMIT,
        };

        let records = self
            .battles
            .recent(character_id, limit)
            .await
            .context("Failed to load battle history")?;

        let mut ids: Vec<CharacterId> = Vec::new();
        for record in &records {
            for id in [record.attacker_id, record.defender_id] {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        let names = self
            .characters
            .get_many(&ids)
            .await
            .context("Failed to resolve battle participants")?;

        let name_of = |id: CharacterId| {
            names
                .get(&id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "Unknown".to_string())
        };

        Ok(records
            .into_iter()
            .map(|record| BattleSummary {
                id: record.id,
                attacker_name: name_of(record.attacker_id),
                attacker_id: record.attacker_id,
                defender_name: name_of(record.defender_id),
                defender_id: record.defender_id,
                final_damage: record.final_damage,
                is_critical: record.is_critical,
                timestamp: record.timestamp,
            })
            .collect())
    }
}
