//! Shared application state

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::application::ports::outbound::{
    BattleLogPort, CharacterRepositoryPort, RandomSourcePort,
};
use crate::application::services::{BattleServiceImpl, CharacterServiceImpl};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::{SqliteBattleLog, SqliteCharacterRepository};
use crate::infrastructure::random::ThreadRngRandomSource;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub character_service: CharacterServiceImpl,
    pub battle_service: BattleServiceImpl,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .context("DATABASE_URL must be a valid SQLite URL")?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .context("Failed to open the SQLite database")?;

        let character_repository: Arc<dyn CharacterRepositoryPort> = Arc::new(
            SqliteCharacterRepository::new(pool.clone())
                .await
                .context("Failed to initialize character repository")?,
        );
        let battle_log: Arc<dyn BattleLogPort> = Arc::new(
            SqliteBattleLog::new(pool)
                .await
                .context("Failed to initialize battle log")?,
        );
        let random: Arc<dyn RandomSourcePort> = Arc::new(ThreadRngRandomSource);

        let character_service = CharacterServiceImpl::new(character_repository.clone());
        let battle_service = BattleServiceImpl::new(character_repository, battle_log, random);

        Ok(Self {
            config,
            character_service,
            battle_service,
        })
    }
}
