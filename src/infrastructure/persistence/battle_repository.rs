//! SQLite battle log

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::application::ports::outbound::BattleLogPort;
use crate::domain::combat::{DamageBreakdown, DamageResult};
use crate::domain::entities::BattleRecord;
use crate::domain::value_objects::{BattleId, CharacterId};

pub struct SqliteBattleLog {
    pool: SqlitePool,
}

impl SqliteBattleLog {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        // Create table if not exists
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS battle_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                attacker_id TEXT NOT NULL,
                defender_id TEXT NOT NULL,
                final_damage INTEGER NOT NULL,
                is_critical INTEGER NOT NULL,
                breakdown TEXT NOT NULL,
                timestamp TIMESTAMP NOT NULL
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[derive(sqlx::FromRow)]
struct BattleRow {
    id: i64,
    attacker_id: String,
    defender_id: String,
    final_damage: i64,
    is_critical: bool,
    breakdown: String,
    timestamp: DateTime<Utc>,
}

impl BattleRow {
    fn into_record(self) -> Result<BattleRecord> {
        let attacker = Uuid::parse_str(&self.attacker_id)
            .with_context(|| format!("Invalid attacker id in log: {}", self.attacker_id))?;
        let defender = Uuid::parse_str(&self.defender_id)
            .with_context(|| format!("Invalid defender id in log: {}", self.defender_id))?;
        let breakdown: DamageBreakdown =
            serde_json::from_str(&self.breakdown).context("Invalid breakdown blob in log")?;

        Ok(BattleRecord {
            id: self.id,
            attacker_id: CharacterId::from_uuid(attacker),
            defender_id: CharacterId::from_uuid(defender),
            final_damage: self.final_damage,
            is_critical: self.is_critical,
            breakdown,
            timestamp: self.timestamp,
        })
    }
}

#[async_trait]
impl BattleLogPort for SqliteBattleLog {
    async fn append(
        &self,
        attacker_id: CharacterId,
        defender_id: CharacterId,
        result: &DamageResult,
    ) -> Result<BattleId> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO battle_history (
                attacker_id, defender_id, final_damage, is_critical, breakdown, timestamp
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#,
        )
        .bind(attacker_id.to_string())
        .bind(defender_id.to_string())
        .bind(result.final_damage)
        .bind(result.is_critical)
        .bind(serde_json::to_string(&result.breakdown)?)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .context("Failed to append battle record")?;

        Ok(inserted.last_insert_rowid())
    }

    async fn recent(
        &self,
        character_id: Option<CharacterId>,
        limit: i64,
    ) -> Result<Vec<BattleRecord>> {
        let rows: Vec<BattleRow> = match character_id {
            Some(id) => {
                sqlx::query_as(
                    r#"
                    SELECT id, attacker_id, defender_id, final_damage, is_critical, breakdown, timestamp
                    FROM battle_history
                    WHERE attacker_id = ?1 OR defender_id = ?1
                    ORDER BY timestamp DESC, id DESC
                    LIMIT ?2
                "#,
                )
                .bind(id.to_string())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(
                    r#"
                    SELECT id, attacker_id, defender_id, final_damage, is_critical, breakdown, timestamp
                    FROM battle_history
                    ORDER BY timestamp DESC, id DESC
                    LIMIT ?1
                "#,
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .context("Failed to fetch battle history")?;

        rows.into_iter().map(BattleRow::into_record).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn log() -> SqliteBattleLog {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        SqliteBattleLog::new(pool).await.unwrap()
    }

    fn sample_result(final_damage: i64, is_critical: bool) -> DamageResult {
        DamageResult {
            raw_damage: final_damage,
            final_damage,
            is_critical,
            critical_multiplier: if is_critical { 1.775 } else { 1.0 },
            element_modifier: 1.0,
            breakdown: DamageBreakdown {
                base_damage: 265,
                stat_modifier: 47,
                level_modifier: 1.0,
                elemental_bonus: 0,
                defense_reduction: 53,
            },
        }
    }

    #[tokio::test]
    async fn appends_and_reads_back_in_reverse_order() {
        let log = log().await;
        let a = CharacterId::new();
        let b = CharacterId::new();

        let first = log.append(a, b, &sample_result(100, false)).await.unwrap();
        let second = log.append(b, a, &sample_result(250, true)).await.unwrap();
        assert!(second > first);

        let records = log.recent(None, 10).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, second);
        assert_eq!(records[0].final_damage, 250);
        assert!(records[0].is_critical);
        assert_eq!(records[0].breakdown.base_damage, 265);
        assert_eq!(records[1].id, first);
    }

    #[tokio::test]
    async fn filters_by_participant_on_either_side() {
        let log = log().await;
        let a = CharacterId::new();
        let b = CharacterId::new();
        let c = CharacterId::new();

        log.append(a, b, &sample_result(100, false)).await.unwrap();
        log.append(c, a, &sample_result(80, false)).await.unwrap();
        log.append(b, c, &sample_result(60, false)).await.unwrap();

        let involving_a = log.recent(Some(a), 10).await.unwrap();
        assert_eq!(involving_a.len(), 2);
        assert!(involving_a
            .iter()
            .all(|r| r.attacker_id == a || r.defender_id == a));
    }

    #[tokio::test]
    async fn respects_the_limit() {
        let log = log().await;
        let a = CharacterId::new();
        let b = CharacterId::new();
        for damage in 1..=5 {
            log.append(a, b, &sample_result(damage, false)).await.unwrap();
        }
        let records = log.recent(None, 3).await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].final_damage, 5);
    }
}
