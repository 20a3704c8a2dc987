//! Value objects - Immutable domain types without identity

mod class;
mod element;
mod ids;

pub use class::CharacterClass;
pub use element::Element;
pub use ids::{BattleId, CharacterId};
