//! Character class enumeration

use serde::{Deserialize, Serialize};

/// The fixed set of character classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Cleric,
    Ranger,
    Paladin,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 6] = [
        CharacterClass::Warrior,
        CharacterClass::Mage,
        CharacterClass::Rogue,
        CharacterClass::Cleric,
        CharacterClass::Ranger,
        CharacterClass::Paladin,
    ];

    /// Parse a class name, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "WARRIOR" => Some(Self::Warrior),
            "MAGE" => Some(Self::Mage),
            "ROGUE" => Some(Self::Rogue),
            "CLERIC" => Some(Self::Cleric),
            "RANGER" => Some(Self::Ranger),
            "PALADIN" => Some(Self::Paladin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warrior => "WARRIOR",
            Self::Mage => "MAGE",
            Self::Rogue => "ROGUE",
            Self::Cleric => "CLERIC",
            Self::Ranger => "RANGER",
            Self::Paladin => "PALADIN",
        }
    }

    /// Whether this class draws its secondary damage term from strength.
    ///
    /// Exactly two behavioral buckets exist: physical classes (Warrior,
    /// Paladin) and everyone else. A third class-specific formula should
    /// extend this discriminator rather than branch elsewhere.
    pub fn is_physical(&self) -> bool {
        matches!(self, Self::Warrior | Self::Paladin)
    }
}

impl std::fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
