//! SQLite character repository

use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::warn;
use uuid::Uuid;

use crate::application::ports::outbound::{CharacterFilter, CharacterRepositoryPort};
use crate::domain::entities::{BaseStats, Character, Equipment};
use crate::domain::value_objects::{CharacterClass, CharacterId, Element};

const CHARACTER_COLUMNS: &str = "id, name, class, element, level, stats, equipment, skills, \
     is_locked, locked_at, commemoration_message, created_at, updated_at, \
     verification_code, is_pending, expires_at";

pub struct SqliteCharacterRepository {
    pool: SqlitePool,
}

impl SqliteCharacterRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        // Create table if not exists
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS characters (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                class TEXT NOT NULL,
                element TEXT NOT NULL,
                level INTEGER NOT NULL,
                stats TEXT NOT NULL,
                equipment TEXT NOT NULL,
                skills TEXT NOT NULL,
                is_locked INTEGER NOT NULL DEFAULT 0,
                locked_at TIMESTAMP,
                commemoration_message TEXT,
                created_at TIMESTAMP NOT NULL,
                updated_at TIMESTAMP NOT NULL,
                verification_code TEXT,
                is_pending INTEGER NOT NULL DEFAULT 0,
                expires_at TIMESTAMP
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[derive(sqlx::FromRow)]
struct CharacterRow {
    id: String,
    name: String,
    class: String,
    element: String,
    level: i64,
    stats: String,
    equipment: String,
    skills: String,
    is_locked: bool,
    locked_at: Option<DateTime<Utc>>,
    commemoration_message: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    verification_code: Option<String>,
    is_pending: bool,
    expires_at: Option<DateTime<Utc>>,
}

impl CharacterRow {
    fn into_character(self) -> Result<Character> {
        let id = Uuid::parse_str(&self.id)
            .with_context(|| format!("Invalid character id in store: {}", self.id))?;
        let class = CharacterClass::parse(&self.class)
            .ok_or_else(|| anyhow!("Unknown character class in store: {}", self.class))?;
        // Unknown persisted elements resolve as neutral instead of failing.
        let element = Element::parse(&self.element).unwrap_or_else(|| {
            warn!(element = %self.element, character_id = %self.id, "Unknown element, treating as NEUTRAL");
            Element::Neutral
        });
        let stats: BaseStats =
            serde_json::from_str(&self.stats).context("Invalid stats blob in store")?;
        let equipment: Equipment =
            serde_json::from_str(&self.equipment).context("Invalid equipment blob in store")?;
        let skills: Vec<String> =
            serde_json::from_str(&self.skills).context("Invalid skills blob in store")?;

        Ok(Character {
            id: CharacterId::from_uuid(id),
            name: self.name,
            class,
            element,
            level: self.level as i32,
            stats,
            equipment,
            skills,
            is_pending: self.is_pending,
            verification_code: self.verification_code,
            expires_at: self.expires_at,
            is_locked: self.is_locked,
            locked_at: self.locked_at,
            commemoration_message: self.commemoration_message,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[async_trait]
impl CharacterRepositoryPort for SqliteCharacterRepository {
    async fn create(&self, character: &Character) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO characters (
                id, name, class, element, level, stats, equipment, skills,
                is_locked, locked_at, commemoration_message, created_at,
                updated_at, verification_code, is_pending, expires_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        )
        .bind(character.id.to_string())
        .bind(&character.name)
        .bind(character.class.as_str())
        .bind(character.element.as_str())
        .bind(character.level)
        .bind(serde_json::to_string(&character.stats)?)
        .bind(serde_json::to_string(&character.equipment)?)
        .bind(serde_json::to_string(&character.skills)?)
        .bind(character.is_locked)
        .bind(character.locked_at)
        .bind(&character.commemoration_message)
        .bind(character.created_at)
        .bind(character.updated_at)
        .bind(&character.verification_code)
        .bind(character.is_pending)
        .bind(character.expires_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert character")?;
        Ok(())
    }

    async fn get(&self, id: CharacterId) -> Result<Option<Character>> {
        let row: Option<CharacterRow> = sqlx::query_as(&format!(
            "SELECT {CHARACTER_COLUMNS} FROM characters WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch character")?;

        row.map(CharacterRow::into_character).transpose()
    }

    async fn get_many(&self, ids: &[CharacterId]) -> Result<HashMap<CharacterId, Character>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {CHARACTER_COLUMNS} FROM characters WHERE id IN ("
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        builder.push(")");

        let rows: Vec<CharacterRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .context("Failed to fetch characters by ids")?;

        let mut map = HashMap::with_capacity(rows.len());
        for row in rows {
            let character = row.into_character()?;
            map.insert(character.id, character);
        }
        Ok(map)
    }

    async fn list(&self, filter: &CharacterFilter) -> Result<Vec<Character>> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {CHARACTER_COLUMNS} FROM characters WHERE 1 = 1"
        ));
        if let Some(class) = filter.class {
            builder.push(" AND class = ").push_bind(class.as_str());
        }
        if let Some(min_level) = filter.min_level {
            builder.push(" AND level >= ").push_bind(min_level);
        }
        if let Some(element) = filter.element {
            builder.push(" AND element = ").push_bind(element.as_str());
        }
        builder.push(" ORDER BY created_at DESC");

        let rows: Vec<CharacterRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .context("Failed to list characters")?;

        rows.into_iter().map(CharacterRow::into_character).collect()
    }

    async fn list_heroes(&self) -> Result<Vec<Character>> {
        let rows: Vec<CharacterRow> = sqlx::query_as(&format!(
            "SELECT {CHARACTER_COLUMNS} FROM characters WHERE is_locked = 1 ORDER BY locked_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list heroes")?;

        rows.into_iter().map(CharacterRow::into_character).collect()
    }

    async fn list_pending(&self) -> Result<Vec<Character>> {
        let rows: Vec<CharacterRow> = sqlx::query_as(&format!(
            "SELECT {CHARACTER_COLUMNS} FROM characters WHERE is_pending = 1 ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list pending characters")?;

        rows.into_iter().map(CharacterRow::into_character).collect()
    }

    async fn purge_expired_pending(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM characters WHERE is_pending = 1 AND expires_at IS NOT NULL AND expires_at < ?",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to purge expired pending characters")?;
        Ok(result.rows_affected())
    }

    async fn update(&self, character: &Character) -> Result<bool> {
        // Approval path only: the guard keeps a non-pending row untouched.
        let result = sqlx::query(
            r#"
            UPDATE characters SET
                is_pending = ?, is_locked = ?, locked_at = ?,
                commemoration_message = ?, verification_code = ?,
                expires_at = ?, updated_at = ?
            WHERE id = ? AND is_pending = 1
        "#,
        )
        .bind(character.is_pending)
        .bind(character.is_locked)
        .bind(character.locked_at)
        .bind(&character.commemoration_message)
        .bind(&character.verification_code)
        .bind(character.expires_at)
        .bind(character.updated_at)
        .bind(character.id.to_string())
        .execute(&self.pool)
        .await
        .context("Failed to update character")?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_pending(&self, id: CharacterId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM characters WHERE id = ? AND is_pending = 1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete pending character")?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn repository() -> SqliteCharacterRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        SqliteCharacterRepository::new(pool).await.unwrap()
    }

    fn sample(name: &str, class: CharacterClass, element: Element, level: i32) -> Character {
        Character::new(
            name,
            class,
            element,
            level,
            BaseStats {
                hp: 4500,
                mp: 250,
                strength: 95,
                intelligence: 45,
                dexterity: 75,
                vitality: 85,
                luck: 60,
            },
        )
    }

    #[tokio::test]
    async fn round_trips_a_character() {
        let repository = repository().await;
        let character = sample("Cloud", CharacterClass::Warrior, Element::Neutral, 50)
            .with_equipment(Equipment {
                weapon: Some("Buster Sword".into()),
                armor: None,
                accessory: Some("Champion Belt".into()),
            })
            .with_skills(vec!["Braver".into(), "Omnislash".into()])
            .pending("ABC123".into(), Utc::now() + Duration::days(7));

        repository.create(&character).await.unwrap();
        let loaded = repository.get(character.id).await.unwrap().unwrap();

        assert_eq!(loaded.name, "Cloud");
        assert_eq!(loaded.class, CharacterClass::Warrior);
        assert_eq!(loaded.element, Element::Neutral);
        assert_eq!(loaded.stats, character.stats);
        assert_eq!(loaded.equipment, character.equipment);
        assert_eq!(loaded.skills, character.skills);
        assert!(loaded.is_pending);
        assert_eq!(loaded.verification_code.as_deref(), Some("ABC123"));
    }

    #[tokio::test]
    async fn missing_characters_come_back_as_none() {
        let repository = repository().await;
        assert!(repository.get(CharacterId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn listing_applies_all_filters() {
        let repository = repository().await;
        repository
            .create(&sample("Cloud", CharacterClass::Warrior, Element::Neutral, 50))
            .await
            .unwrap();
        repository
            .create(&sample("Vivi", CharacterClass::Mage, Element::Fire, 48))
            .await
            .unwrap();
        repository
            .create(&sample("Rookie", CharacterClass::Mage, Element::Fire, 5))
            .await
            .unwrap();

        let all = repository.list(&CharacterFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let mages = repository
            .list(&CharacterFilter {
                class: Some(CharacterClass::Mage),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(mages.len(), 2);

        let seasoned_fire_mages = repository
            .list(&CharacterFilter {
                class: Some(CharacterClass::Mage),
                min_level: Some(10),
                element: Some(Element::Fire),
            })
            .await
            .unwrap();
        assert_eq!(seasoned_fire_mages.len(), 1);
        assert_eq!(seasoned_fire_mages[0].name, "Vivi");
    }

    #[tokio::test]
    async fn get_many_skips_missing_ids() {
        let repository = repository().await;
        let cloud = sample("Cloud", CharacterClass::Warrior, Element::Neutral, 50);
        repository.create(&cloud).await.unwrap();

        let ghost = CharacterId::new();
        let found = repository.get_many(&[cloud.id, ghost]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(found.contains_key(&cloud.id));
        assert!(!found.contains_key(&ghost));
    }

    #[tokio::test]
    async fn approval_update_only_touches_pending_rows() {
        let repository = repository().await;
        let mut character = sample("Cloud", CharacterClass::Warrior, Element::Neutral, 50)
            .pending("XYZ789".into(), Utc::now() + Duration::days(7));
        repository.create(&character).await.unwrap();

        character.approve("Champion");
        assert!(repository.update(&character).await.unwrap());
        // second approval finds no pending row
        assert!(!repository.update(&character).await.unwrap());

        let heroes = repository.list_heroes().await.unwrap();
        assert_eq!(heroes.len(), 1);
        assert!(heroes[0].verification_code.is_none());
        assert_eq!(heroes[0].commemoration_message.as_deref(), Some("Champion"));
    }

    #[tokio::test]
    async fn purges_only_expired_pending_rows() {
        let repository = repository().await;
        let expired = sample("Old", CharacterClass::Rogue, Element::Dark, 20)
            .pending("AAAAAA".into(), Utc::now() - Duration::days(1));
        let fresh = sample("New", CharacterClass::Rogue, Element::Dark, 20)
            .pending("BBBBBB".into(), Utc::now() + Duration::days(6));
        repository.create(&expired).await.unwrap();
        repository.create(&fresh).await.unwrap();

        let purged = repository.purge_expired_pending(Utc::now()).await.unwrap();
        assert_eq!(purged, 1);

        let pending = repository.list_pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name, "New");
    }

    #[tokio::test]
    async fn unknown_stored_element_falls_back_to_neutral() {
        let repository = repository().await;
        let character = sample("Mystery", CharacterClass::Ranger, Element::Wind, 30);
        repository.create(&character).await.unwrap();

        sqlx::query("UPDATE characters SET element = 'PLASMA' WHERE id = ?")
            .bind(character.id.to_string())
            .execute(&repository.pool)
            .await
            .unwrap();

        let loaded = repository.get(character.id).await.unwrap().unwrap();
        assert_eq!(loaded.element, Element::Neutral);
    }
}
