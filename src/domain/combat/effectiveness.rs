//! Elemental effectiveness table
//!
//! A directional, hand-authored matrix over the element set. Symmetric
//! pairs are not guaranteed symmetric (Fire->Ice is 2.0 while Ice->Fire is
//! 0.5), so every ordered pair is listed explicitly rather than derived
//! from a symmetry rule. Any pair not listed is neutral.

use crate::domain::value_objects::Element;

/// Multiplier used for every pair without an authored entry
pub const NEUTRAL_EFFECTIVENESS: f64 = 1.0;

/// Look up the damage multiplier for an attacker/defender element pair.
///
/// Total over the element set: always returns a positive multiplier and
/// never fails.
pub fn effectiveness(attacker: Element, defender: Element) -> f64 {
    use Element::*;
    match (attacker, defender) {
        (Fire, Fire) => 0.5,
        (Fire, Ice) => 2.0,
        (Fire, Earth) => 1.5,
        (Fire, Water) => 0.5,

        (Ice, Fire) => 0.5,
        (Ice, Ice) => 0.5,
        (Ice, Lightning) => 1.5,

        (Lightning, Ice) => 1.5,
        (Lightning, Lightning) => 0.5,
        (Lightning, Earth) => 0.5,
        (Lightning, Water) => 2.0,
        (Lightning, Wind) => 1.5,

        (Earth, Lightning) => 2.0,
        (Earth, Earth) => 0.5,
        (Earth, Wind) => 0.5,

        (Water, Fire) => 2.0,
        (Water, Lightning) => 0.5,
        (Water, Earth) => 1.5,
        (Water, Water) => 0.5,

        (Wind, Earth) => 2.0,
        (Wind, Wind) => 0.5,

        (Holy, Holy) => 0.5,
        (Holy, Dark) => 2.0,

        (Dark, Holy) => 2.0,
        (Dark, Dark) => 0.5,
        (Dark, Light) => 1.5,

        (Light, Dark) => 2.0,
        (Light, Light) => 0.5,

        // Neutral attacks and every unlisted pair resolve to 1.0
        _ => NEUTRAL_EFFECTIVENESS,
    }
}
