//! Battle log entry - append-only record of a resolved exchange

use chrono::{DateTime, Utc};

use crate::domain::combat::DamageBreakdown;
use crate::domain::value_objects::{BattleId, CharacterId};

/// One recorded battle. The id and timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleRecord {
    pub id: BattleId,
    pub attacker_id: CharacterId,
    pub defender_id: CharacterId,
    pub final_damage: i64,
    pub is_critical: bool,
    /// Intermediate terms, persisted as an opaque blob for debugging
    pub breakdown: DamageBreakdown,
    pub timestamp: DateTime<Utc>,
}
