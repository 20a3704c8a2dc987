//! Pure combat rules: the effectiveness table and the damage calculator

mod damage;
mod effectiveness;

pub use damage::{calculate, critical_chance, DamageBreakdown, DamageResult, BASE_CRITICAL_CHANCE};
pub use effectiveness::{effectiveness, NEUTRAL_EFFECTIVENESS};
