//! Persistence adapters - SQLite repositories behind the application ports

mod battle_repository;
mod character_repository;

pub use battle_repository::SqliteBattleLog;
pub use character_repository::SqliteCharacterRepository;
