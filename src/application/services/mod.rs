//! Application services - Use case implementations
//!
//! Services accept port dependencies and return domain entities or
//! service-level DTOs; HTTP concerns stay in the infrastructure layer.

pub mod battle_service;
pub mod character_service;

#[cfg(test)]
pub mod test_support;

pub use battle_service::{
    BattleOutcome, BattleService, BattleServiceError, BattleServiceImpl, BattleSummary,
    CombatantSummary, ResolveBattleRequest, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT,
};
pub use character_service::{
    CharacterService, CharacterServiceError, CharacterServiceImpl, CreateCharacterRequest,
    CreatedCharacter, PENDING_EXPIRY_DAYS,
};
