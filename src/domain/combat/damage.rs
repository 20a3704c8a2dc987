//! Damage calculator - the pure combat-resolution core
//!
//! Stateless and synchronous: given two character snapshots and an
//! already-resolved critical-hit decision it always produces a result,
//! with no error path even for out-of-range stats. The critical coin flip
//! itself belongs to the caller so both branches stay testable.

use serde::{Deserialize, Serialize};

use crate::domain::combat::effectiveness;
use crate::domain::entities::Character;

/// Base probability of a critical hit before the luck bonus
pub const BASE_CRITICAL_CHANCE: f64 = 0.15;

/// Probability of a critical hit for an attacker with the given luck.
///
/// Not clamped: luck values far outside the ordinary 0-150 band are a
/// data-quality concern for the character store, not rejected here.
pub fn critical_chance(luck: i32) -> f64 {
    BASE_CRITICAL_CHANCE + luck as f64 / 1000.0
}

/// Intermediate terms, independently floored/rounded for display.
///
/// These are reporting values only; because each term is truncated
/// separately they do not necessarily re-sum to the raw or final damage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageBreakdown {
    pub base_damage: i64,
    pub stat_modifier: i64,
    /// Rounded to two decimal places
    pub level_modifier: f64,
    pub elemental_bonus: i64,
    pub defense_reduction: i64,
}

/// Outcome of one damage calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageResult {
    /// Pre-critical, pre-final-elemental-scaling damage, floored
    pub raw_damage: i64,
    /// Always >= 1
    pub final_damage: i64,
    pub is_critical: bool,
    pub critical_multiplier: f64,
    pub element_modifier: f64,
    pub breakdown: DamageBreakdown,
}

/// Compute battle damage between an attacker and a defender.
///
/// The elemental modifier is applied twice: once inside the elemental
/// bonus term and again as the final multiplicative scale. That
/// compounding is observed behavior carried over from the original
/// formula and is preserved deliberately; see DESIGN.md.
pub fn calculate(attacker: &Character, defender: &Character, is_critical: bool) -> DamageResult {
    let base_damage = attacker.stats.strength as f64 * 2.0 + attacker.level as f64 * 1.5;

    let stat_modifier = if attacker.class.is_physical() {
        attacker.stats.strength as f64 * 0.5
    } else {
        attacker.stats.dexterity as f64 * 0.3
    };

    // Unclamped: large negative level gaps drive this below zero and the
    // negative value propagates arithmetically.
    let level_modifier = 1.0 + (attacker.level - defender.level) as f64 * 0.02;

    let element_modifier = effectiveness(attacker.element, defender.element);
    let elemental_bonus = base_damage * (element_modifier - 1.0);

    let defense_value = defender.stats.vitality as f64 * 0.8 + defender.level as f64 * 0.5;
    // Defense can never remove more than 40% of base damage.
    let defense_reduction = (defense_value * 0.5).min(base_damage * 0.4);

    let critical_multiplier = if is_critical {
        1.5 + attacker.stats.luck as f64 / 200.0
    } else {
        1.0
    };

    let raw_damage =
        (base_damage + stat_modifier) * level_modifier + elemental_bonus - defense_reduction;
    let final_damage = (raw_damage * critical_multiplier * element_modifier)
        .floor()
        .max(1.0) as i64;

    DamageResult {
        raw_damage: raw_damage.floor() as i64,
        final_damage,
        is_critical,
        critical_multiplier,
        element_modifier,
        breakdown: DamageBreakdown {
            base_damage: base_damage.floor() as i64,
            stat_modifier: stat_modifier.floor() as i64,
            level_modifier: (level_modifier * 100.0).round() / 100.0,
            elemental_bonus: elemental_bonus.floor() as i64,
            defense_reduction: defense_reduction.floor() as i64,
        },
    }
}
