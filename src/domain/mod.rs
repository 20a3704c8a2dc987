//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Character, BattleRecord
//! - Value Objects: typed ids, CharacterClass, Element
//! - Combat: the effectiveness table and the pure damage calculator

pub mod combat;
pub mod entities;
pub mod value_objects;
