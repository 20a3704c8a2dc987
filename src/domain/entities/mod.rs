//! Domain entities

mod battle;
mod character;

pub use battle::BattleRecord;
pub use character::{BaseStats, Character, Equipment};
