//! Character DTOs
//!
//! Wire casing is camelCase to stay compatible with the original public
//! API of this service.

use serde::{Deserialize, Serialize};

use crate::application::services::CreatedCharacter;
use crate::domain::entities::{BaseStats, Character, Equipment};
use crate::domain::value_objects::{CharacterClass, Element};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharacterRequestDto {
    pub name: String,
    pub class: String,
    pub element: String,
    #[serde(default)]
    pub level: Option<i32>,
    pub base_stats: BaseStats,
    #[serde(default)]
    pub equipment: Option<Equipment>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterResponseDto {
    pub id: String,
    pub name: String,
    pub class: String,
    pub element: String,
    pub level: i32,
    pub base_stats: BaseStats,
    pub equipment: Equipment,
    pub skills: Vec<String>,
    pub is_locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commemoration_message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Character> for CharacterResponseDto {
    fn from(c: Character) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name,
            class: c.class.as_str().to_string(),
            element: c.element.as_str().to_string(),
            level: c.level,
            base_stats: c.stats,
            equipment: c.equipment,
            skills: c.skills,
            is_locked: c.is_locked,
            commemoration_message: c.commemoration_message,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCharacterResponseDto {
    pub character: CharacterResponseDto,
    pub verification_code: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

impl From<CreatedCharacter> for CreatedCharacterResponseDto {
    fn from(created: CreatedCharacter) -> Self {
        Self {
            character: created.character.into(),
            verification_code: created.verification_code,
            expires_at: created.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterListResponseDto {
    pub count: usize,
    pub characters: Vec<CharacterResponseDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroesResponseDto {
    pub count: usize,
    pub heroes: Vec<CharacterResponseDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCharacterDto {
    pub id: String,
    pub name: String,
    pub class: String,
    pub element: String,
    pub stats: BaseStats,
    pub verification_code: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<Character> for PendingCharacterDto {
    fn from(c: Character) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name,
            class: c.class.as_str().to_string(),
            element: c.element.as_str().to_string(),
            stats: c.stats,
            verification_code: c.verification_code,
            created_at: c.created_at,
            expires_at: c.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingListResponseDto {
    pub count: usize,
    pub pending: Vec<PendingCharacterDto>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveCharacterRequestDto {
    #[serde(default)]
    pub commemoration_message: Option<String>,
}

/// Parse a class name from the wire, tolerating any casing
pub fn parse_class(s: &str) -> Option<CharacterClass> {
    CharacterClass::parse(s)
}

/// Parse an element name from the wire, tolerating any casing
pub fn parse_element(s: &str) -> Option<Element> {
    Element::parse(s)
}
