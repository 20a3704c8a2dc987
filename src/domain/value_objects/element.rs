//! Element enumeration
//!
//! The canonical element set is the ten-element variant. Persisted values
//! are upper-case strings; parsing normalizes case so lowercase or
//! mixed-case input still resolves.

use serde::{Deserialize, Serialize};

/// The fixed set of elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Element {
    Fire,
    Ice,
    Lightning,
    Earth,
    Water,
    Wind,
    Holy,
    Dark,
    Light,
    Neutral,
}

impl Element {
    pub const ALL: [Element; 10] = [
        Element::Fire,
        Element::Ice,
        Element::Lightning,
        Element::Earth,
        Element::Water,
        Element::Wind,
        Element::Holy,
        Element::Dark,
        Element::Light,
        Element::Neutral,
    ];

    /// Parse an element name, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "FIRE" => Some(Self::Fire),
            "ICE" => Some(Self::Ice),
            "LIGHTNING" => Some(Self::Lightning),
            "EARTH" => Some(Self::Earth),
            "WATER" => Some(Self::Water),
            "WIND" => Some(Self::Wind),
            "HOLY" => Some(Self::Holy),
            "DARK" => Some(Self::Dark),
            "LIGHT" => Some(Self::Light),
            "NEUTRAL" => Some(Self::Neutral),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fire => "FIRE",
            Self::Ice => "ICE",
            Self::Lightning => "LIGHTNING",
            Self::Earth => "EARTH",
            Self::Water => "WATER",
            Self::Wind => "WIND",
            Self::Holy => "HOLY",
            Self::Dark => "DARK",
            Self::Light => "LIGHT",
            Self::Neutral => "NEUTRAL",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
