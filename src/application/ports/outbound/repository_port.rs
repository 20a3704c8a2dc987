//! Repository ports - Interfaces for data persistence
//!
//! Application services depend on these traits, not on concrete
//! repositories, so tests can supply in-memory implementations.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::combat::DamageResult;
use crate::domain::entities::{BattleRecord, Character};
use crate::domain::value_objects::{BattleId, CharacterClass, CharacterId, Element};

/// Optional filters for character listings
#[derive(Debug, Clone, Default)]
pub struct CharacterFilter {
    pub class: Option<CharacterClass>,
    pub min_level: Option<i32>,
    pub element: Option<Element>,
}

/// Repository port for Character storage
#[async_trait]
pub trait CharacterRepositoryPort: Send + Sync {
    /// Store a new character
    async fn create(&self, character: &Character) -> Result<()>;

    /// Fetch a character by id
    async fn get(&self, id: CharacterId) -> Result<Option<Character>>;

    /// Fetch several characters at once, keyed by id; missing ids are
    /// simply absent from the map
    async fn get_many(&self, ids: &[CharacterId]) -> Result<HashMap<CharacterId, Character>>;

    /// List characters matching the filter
    async fn list(&self, filter: &CharacterFilter) -> Result<Vec<Character>>;

    /// List locked (approved) characters, most recently locked first
    async fn list_heroes(&self) -> Result<Vec<Character>>;

    /// List pending characters, newest first
    async fn list_pending(&self) -> Result<Vec<Character>>;

    /// Delete pending characters whose verification window has expired,
    /// returning how many were removed
    async fn purge_expired_pending(&self, now: DateTime<Utc>) -> Result<u64>;

    /// Persist an approval (pending -> locked) performed on the entity.
    /// Returns false when the id does not name a pending character.
    async fn update(&self, character: &Character) -> Result<bool>;

    /// Delete a pending character. Returns false when the id does not
    /// name a pending character.
    async fn delete_pending(&self, id: CharacterId) -> Result<bool>;
}

/// Append-only port for the battle log
#[async_trait]
pub trait BattleLogPort: Send + Sync {
    /// Record one resolved battle; the store assigns the id and timestamp
    async fn append(
        &self,
        attacker_id: CharacterId,
        defender_id: CharacterId,
        result: &DamageResult,
    ) -> Result<BattleId>;

    /// Most recent battles, optionally restricted to those involving one
    /// character on either side
    async fn recent(
        &self,
        character_id: Option<CharacterId>,
        limit: i64,
    ) -> Result<Vec<BattleRecord>>;
}
