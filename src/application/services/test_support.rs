//! In-memory port implementations shared by service tests

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::ports::outbound::{
    BattleLogPort, CharacterFilter, CharacterRepositoryPort, RandomSourcePort,
};
use crate::domain::combat::DamageResult;
use crate::domain::entities::{BattleRecord, Character};
use crate::domain::value_objects::{BattleId, CharacterId};

/// Random source that always returns the same draw
pub struct FixedRandom(pub f64);

impl RandomSourcePort for FixedRandom {
    fn next_unit(&self) -> f64 {
        self.0
    }
}

/// Character store backed by a HashMap
#[derive(Default)]
pub struct InMemoryCharacterRepository {
    characters: Mutex<HashMap<CharacterId, Character>>,
}

impl InMemoryCharacterRepository {
    pub fn insert(&self, character: Character) {
        self.characters
            .lock()
            .unwrap()
            .insert(character.id, character);
    }
}

#[async_trait]
impl CharacterRepositoryPort for InMemoryCharacterRepository {
    async fn create(&self, character: &Character) -> Result<()> {
        self.insert(character.clone());
        Ok(())
    }

    async fn get(&self, id: CharacterId) -> Result<Option<Character>> {
        Ok(self.characters.lock().unwrap().get(&id).cloned())
    }

    async fn get_many(&self, ids: &[CharacterId]) -> Result<HashMap<CharacterId, Character>> {
        let characters = self.characters.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| characters.get(id).map(|c| (*id, c.clone())))
            .collect())
    }

    async fn list(&self, filter: &CharacterFilter) -> Result<Vec<Character>> {
        Ok(self
            .characters
            .lock()
            .unwrap()
            .values()
            .filter(|c| filter.class.is_none_or(|class| c.class == class))
            .filter(|c| filter.min_level.is_none_or(|min| c.level >= min))
            .filter(|c| filter.element.is_none_or(|element| c.element == element))
            .cloned()
            .collect())
    }

    async fn list_heroes(&self) -> Result<Vec<Character>> {
        let mut heroes: Vec<Character> = self
            .characters
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.is_locked)
            .cloned()
            .collect();
        heroes.sort_by(|a, b| b.locked_at.cmp(&a.locked_at));
        Ok(heroes)
    }

    async fn list_pending(&self) -> Result<Vec<Character>> {
        let mut pending: Vec<Character> = self
            .characters
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.is_pending)
            .cloned()
            .collect();
        pending.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(pending)
    }

    async fn purge_expired_pending(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut characters = self.characters.lock().unwrap();
        let before = characters.len();
        characters.retain(|_, c| {
            !(c.is_pending && c.expires_at.map(|expiry| expiry < now).unwrap_or(false))
        });
        Ok((before - characters.len()) as u64)
    }

    async fn update(&self, character: &Character) -> Result<bool> {
        let mut characters = self.characters.lock().unwrap();
        match characters.get(&character.id) {
            Some(existing) if existing.is_pending => {
                characters.insert(character.id, character.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_pending(&self, id: CharacterId) -> Result<bool> {
        let mut characters = self.characters.lock().unwrap();
        match characters.get(&id) {
            Some(existing) if existing.is_pending => {
                characters.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Battle log backed by a Vec
#[derive(Default)]
pub struct InMemoryBattleLog {
    records: Mutex<Vec<BattleRecord>>,
}

#[async_trait]
impl BattleLogPort for InMemoryBattleLog {
    async fn append(
        &self,
        attacker_id: CharacterId,
        defender_id: CharacterId,
        result: &DamageResult,
    ) -> Result<BattleId> {
        let mut records = self.records.lock().unwrap();
        let id = records.len() as BattleId + 1;
        records.push(BattleRecord {
            id,
            attacker_id,
            defender_id,
            final_damage: result.final_damage,
            is_critical: result.is_critical,
            breakdown: result.breakdown.clone(),
            timestamp: Utc::now(),
        });
        Ok(id)
    }

    async fn recent(
        &self,
        character_id: Option<CharacterId>,
        limit: i64,
    ) -> Result<Vec<BattleRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .rev()
            .filter(|r| {
                character_id.is_none_or(|id| r.attacker_id == id || r.defender_id == id)
            })
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
