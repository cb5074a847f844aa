use hydroprint_domain::shared::DomainError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::fs::OpenOptions;
use std::path::Path;
use std::str::FromStr;

use crate::config::TimeoutConfig;

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(db_path: &str) -> Result<Self, DomainError> {
        let path = Path::new(db_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DomainError::Infrastructure(format!("Failed to create DB directory: {}", e))
            })?;
        }

        if !path.exists() {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(false)
                .open(path)
                .map_err(|e| {
                    DomainError::Infrastructure(format!("Failed to create DB file: {}", e))
                })?;
        }

        let timeouts = TimeoutConfig::global();
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path))
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(timeouts.db_busy)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(timeouts.db_connect)
            .connect_with(options)
            .await
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?;

        log::info!("Database opened at {}", db_path);
        Ok(Self { pool })
    }

    /// Private in-memory database; a single connection keeps every query on
    /// the same memory store.
    pub async fn in_memory() -> Result<Self, DomainError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), DomainError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
