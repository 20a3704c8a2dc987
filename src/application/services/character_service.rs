//! Character Service - Application service for character management
//!
//! Use case implementations for creating, listing, and moderating
//! characters. User-submitted characters enter a pending state with a
//! verification code and a seven-day expiry; an admin either approves them
//! onto the heroes board or deletes them.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{CharacterFilter, CharacterRepositoryPort};
use crate::domain::entities::{BaseStats, Character, Equipment};
use crate::domain::value_objects::{CharacterClass, CharacterId, Element};

/// Characters a submitter must verify within this window before the
/// pending row is purged
pub const PENDING_EXPIRY_DAYS: i64 = 7;

const VERIFICATION_CODE_LEN: usize = 6;
const VERIFICATION_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Request to create a new character
#[derive(Debug, Clone)]
pub struct CreateCharacterRequest {
    pub name: String,
    pub class: CharacterClass,
    pub element: Element,
    /// Defaults to 1 when absent
    pub level: Option<i32>,
    pub stats: BaseStats,
    pub equipment: Option<Equipment>,
    pub skills: Vec<String>,
}

/// A freshly created character plus its moderation handle
#[derive(Debug, Clone)]
pub struct CreatedCharacter {
    pub character: Character,
    pub verification_code: String,
    pub expires_at: DateTime<Utc>,
}

/// Errors surfaced by the character service
#[derive(Debug, thiserror::Error)]
pub enum CharacterServiceError {
    #[error("invalid request: {0}")]
    Invalid(String),
    #[error("character not found: {0}")]
    NotFound(CharacterId),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Character service trait defining the application use cases
#[async_trait]
pub trait CharacterService: Send + Sync {
    /// Create a new character in the pending state
    async fn create_character(
        &self,
        request: CreateCharacterRequest,
    ) -> Result<CreatedCharacter, CharacterServiceError>;

    /// Fetch a character by id
    async fn get_character(
        &self,
        id: CharacterId,
    ) -> Result<Option<Character>, CharacterServiceError>;

    /// List characters matching the filter
    async fn list_characters(
        &self,
        filter: CharacterFilter,
    ) -> Result<Vec<Character>, CharacterServiceError>;

    /// List approved (locked) characters, newest lock first
    async fn list_heroes(&self) -> Result<Vec<Character>, CharacterServiceError>;

    /// List pending characters after purging expired ones
    async fn list_pending(&self) -> Result<Vec<Character>, CharacterServiceError>;

    /// Approve a pending character onto the heroes board
    async fn approve_character(
        &self,
        id: CharacterId,
        commemoration_message: String,
    ) -> Result<Character, CharacterServiceError>;

    /// Delete a pending character
    async fn delete_pending(&self, id: CharacterId) -> Result<(), CharacterServiceError>;
}

/// Default character service backed by the repository port
pub struct CharacterServiceImpl {
    repository: Arc<dyn CharacterRepositoryPort>,
}

impl CharacterServiceImpl {
    pub fn new(repository: Arc<dyn CharacterRepositoryPort>) -> Self {
        Self { repository }
    }

    fn validate_create_request(request: &CreateCharacterRequest) -> Result<(), CharacterServiceError> {
        if request.name.trim().is_empty() {
            return Err(CharacterServiceError::Invalid(
                "Character name cannot be empty".into(),
            ));
        }
        if request.name.len() > 255 {
            return Err(CharacterServiceError::Invalid(
                "Character name cannot exceed 255 characters".into(),
            ));
        }
        if let Some(level) = request.level {
            if !(1..=99).contains(&level) {
                return Err(CharacterServiceError::Invalid(
                    "Character level must be between 1 and 99".into(),
                ));
            }
        }
        let stats = &request.stats;
        let all = [
            stats.hp,
            stats.mp,
            stats.strength,
            stats.intelligence,
            stats.dexterity,
            stats.vitality,
            stats.luck,
        ];
        if all.iter().any(|v| *v < 0) {
            return Err(CharacterServiceError::Invalid(
                "Base stats must be non-negative".into(),
            ));
        }
        Ok(())
    }

    fn generate_verification_code() -> String {
        let mut rng = rand::thread_rng();
        (0..VERIFICATION_CODE_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..VERIFICATION_ALPHABET.len());
                VERIFICATION_ALPHABET[idx] as char
            })
            .collect()
    }
}

#[async_trait]
impl CharacterService for CharacterServiceImpl {
    #[instrument(skip(self), fields(name = %request.name, class = %request.class))]
    async fn create_character(
        &self,
        request: CreateCharacterRequest,
    ) -> Result<CreatedCharacter, CharacterServiceError> {
        Self::validate_create_request(&request)?;

        let level = request.level.unwrap_or(1);
        let verification_code = Self::generate_verification_code();
        let expires_at = Utc::now() + Duration::days(PENDING_EXPIRY_DAYS);

        let mut character = Character::new(
            request.name.trim(),
            request.class,
            request.element,
            level,
            request.stats,
        )
        .pending(verification_code.clone(), expires_at);

        if let Some(equipment) = request.equipment {
            character = character.with_equipment(equipment);
        }
        character = character.with_skills(request.skills);

        self.repository
            .create(&character)
            .await
            .context("Failed to create character in repository")?;

        info!(
            character_id = %character.id,
            element = %character.element,
            "Created pending character: {}",
            character.name
        );
        Ok(CreatedCharacter {
            character,
            verification_code,
            expires_at,
        })
    }

    #[instrument(skip(self))]
    async fn get_character(
        &self,
        id: CharacterId,
    ) -> Result<Option<Character>, CharacterServiceError> {
        debug!(character_id = %id, "Fetching character");
        Ok(self
            .repository
            .get(id)
            .await
            .context("Failed to get character from repository")?)
    }

    #[instrument(skip(self))]
    async fn list_characters(
        &self,
        filter: CharacterFilter,
    ) -> Result<Vec<Character>, CharacterServiceError> {
        Ok(self
            .repository
            .list(&filter)
            .await
            .context("Failed to list characters from repository")?)
    }

    #[instrument(skip(self))]
    async fn list_heroes(&self) -> Result<Vec<Character>, CharacterServiceError> {
        Ok(self
            .repository
            .list_heroes()
            .await
            .context("Failed to list heroes from repository")?)
    }

    #[instrument(skip(self))]
    async fn list_pending(&self) -> Result<Vec<Character>, CharacterServiceError> {
        let purged = self
            .repository
            .purge_expired_pending(Utc::now())
            .await
            .context("Failed to purge expired pending characters")?;
        if purged > 0 {
            info!(purged, "Purged expired pending characters");
        }
        Ok(self
            .repository
            .list_pending()
            .await
            .context("Failed to list pending characters")?)
    }

    #[instrument(skip(self, commemoration_message))]
    async fn approve_character(
        &self,
        id: CharacterId,
        commemoration_message: String,
    ) -> Result<Character, CharacterServiceError> {
        let mut character = self
            .repository
            .get(id)
            .await
            .context("Failed to load character for approval")?
            .filter(|c| c.is_pending)
            .ok_or(CharacterServiceError::NotFound(id))?;

        character.approve(commemoration_message);

        let updated = self
            .repository
            .update(&character)
            .await
            .context("Failed to persist character approval")?;
        if !updated {
            // Lost a race with a purge or a concurrent decision
            warn!(character_id = %id, "Approval target disappeared before update");
            return Err(CharacterServiceError::NotFound(id));
        }

        info!(character_id = %id, "Approved character: {}", character.name);
        Ok(character)
    }

    #[instrument(skip(self))]
    async fn delete_pending(&self, id: CharacterId) -> Result<(), CharacterServiceError> {
        let deleted = self
            .repository
            .delete_pending(id)
            .await
            .context("Failed to delete pending character")?;
        if !deleted {
            return Err(CharacterServiceError::NotFound(id));
        }
        info!(character_id = %id, "Deleted pending character");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::InMemoryCharacterRepository;

    fn sample_request() -> CreateCharacterRequest {
        CreateCharacterRequest {
            name: "Cloud Strife".into(),
            class: CharacterClass::Warrior,
            element: Element::Neutral,
            level: Some(50),
            stats: BaseStats {
                hp: 4500,
                mp: 250,
                strength: 95,
                intelligence: 45,
                dexterity: 75,
                vitality: 85,
                luck: 60,
            },
            equipment: None,
            skills: vec!["Braver".into()],
        }
    }

    #[tokio::test]
    async fn created_characters_are_pending_with_a_code() {
        let repository = Arc::new(InMemoryCharacterRepository::default());
        let service = CharacterServiceImpl::new(repository.clone());

        let created = service.create_character(sample_request()).await.unwrap();
        assert!(created.character.is_pending);
        assert_eq!(created.verification_code.len(), 6);
        assert!(created
            .verification_code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert!(created.expires_at > Utc::now() + Duration::days(PENDING_EXPIRY_DAYS - 1));

        let stored = service
            .get_character(created.character.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.name, "Cloud Strife");
    }

    #[tokio::test]
    async fn rejects_out_of_range_level() {
        let service =
            CharacterServiceImpl::new(Arc::new(InMemoryCharacterRepository::default()));
        let mut request = sample_request();
        request.level = Some(100);
        let err = service.create_character(request).await.unwrap_err();
        assert!(matches!(err, CharacterServiceError::Invalid(_)));
    }

    #[tokio::test]
    async fn rejects_negative_stats() {
        let service =
            CharacterServiceImpl::new(Arc::new(InMemoryCharacterRepository::default()));
        let mut request = sample_request();
        request.stats.luck = -1;
        let err = service.create_character(request).await.unwrap_err();
        assert!(matches!(err, CharacterServiceError::Invalid(_)));
    }

    #[tokio::test]
    async fn approval_moves_a_character_to_the_heroes_board() {
        let repository = Arc::new(InMemoryCharacterRepository::default());
        let service = CharacterServiceImpl::new(repository.clone());

        let created = service.create_character(sample_request()).await.unwrap();
        let approved = service
            .approve_character(created.character.id, "First champion".into())
            .await
            .unwrap();
        assert!(approved.is_locked);
        assert!(!approved.is_pending);

        let heroes = service.list_heroes().await.unwrap();
        assert_eq!(heroes.len(), 1);
        assert_eq!(heroes[0].id, created.character.id);
        assert!(service.list_pending().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn approving_a_missing_character_is_not_found() {
        let service =
            CharacterServiceImpl::new(Arc::new(InMemoryCharacterRepository::default()));
        let err = service
            .approve_character(CharacterId::new(), String::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CharacterServiceError::NotFound(_)));
    }
}
