//! Character entity - stored combatants with base stats and moderation state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CharacterClass, CharacterId, Element};

/// The seven base attributes every character carries.
///
/// All values are non-negative by invariant; the invariant is enforced at
/// creation time, not by the damage calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: i32,
    pub mp: i32,
    pub strength: i32,
    pub intelligence: i32,
    pub dexterity: i32,
    pub vitality: i32,
    pub luck: i32,
}

/// Equipment slots, informational only (unused by the damage formula)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub armor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessory: Option<String>,
}

/// A combatant in the arena
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub class: CharacterClass,
    pub element: Element,
    /// Level in [1, 99]
    pub level: i32,
    pub stats: BaseStats,
    pub equipment: Equipment,
    /// Skill names, informational only
    pub skills: Vec<String>,

    // Moderation state: user-submitted characters start pending and must be
    // approved before they show up on the heroes board.
    pub is_pending: bool,
    pub verification_code: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_locked: bool,
    pub locked_at: Option<DateTime<Utc>>,
    pub commemoration_message: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Character {
    pub fn new(
        name: impl Into<String>,
        class: CharacterClass,
        element: Element,
        level: i32,
        stats: BaseStats,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: CharacterId::new(),
            name: name.into(),
            class,
            element,
            level,
            stats,
            equipment: Equipment::default(),
            skills: Vec::new(),
            is_pending: false,
            verification_code: None,
            expires_at: None,
            is_locked: false,
            locked_at: None,
            commemoration_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = equipment;
        self
    }

    pub fn with_skills(mut self, skills: Vec<String>) -> Self {
        self.skills = skills;
        self
    }

    /// Mark a freshly created character as pending moderation
    pub fn pending(mut self, verification_code: String, expires_at: DateTime<Utc>) -> Self {
        self.is_pending = true;
        self.verification_code = Some(verification_code);
        self.expires_at = Some(expires_at);
        self
    }

    /// Approve a pending character: lock it onto the heroes board and
    /// retire its verification code
    pub fn approve(&mut self, commemoration_message: impl Into<String>) {
        self.is_pending = false;
        self.is_locked = true;
        self.locked_at = Some(Utc::now());
        self.verification_code = None;
        self.expires_at = None;
        self.commemoration_message = Some(commemoration_message.into());
        self.updated_at = Utc::now();
    }
}
