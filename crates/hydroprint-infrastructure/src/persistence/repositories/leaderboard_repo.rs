use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;
use sqlx::{FromRow, Sqlite, SqlitePool};
use std::sync::Arc;

use crate::persistence::SqliteRepositoryBase;
use hydroprint_domain::leaderboard::{LeaderboardEntry, LeaderboardRepository};
use hydroprint_domain::shared::{DomainError, UserId};

#[derive(FromRow)]
struct LeaderboardRow {
    user_id: String,
    display_name: String,
    monthly_usage: i64,
    updated_at: DateTime<Utc>,
}

impl LeaderboardRow {
    fn into_entry(self) -> LeaderboardEntry {
        LeaderboardEntry {
            user_id: UserId::from_string(&self.user_id),
            display_name: self.display_name,
            monthly_usage: self.monthly_usage,
            updated_at: self.updated_at,
        }
    }
}

/// Publish (upsert) a user's monthly usage estimate
pub(crate) fn publish_query(
    user_id: &UserId,
    monthly_usage: i64,
    updated_at: DateTime<Utc>,
) -> Query<'_, Sqlite, SqliteArguments<'_>> {
    let query = r#"
        INSERT INTO leaderboard (user_id, monthly_usage, updated_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(user_id) DO UPDATE SET
            monthly_usage = ?2,
            updated_at = ?3
    "#;

    sqlx::query(query)
        .bind(user_id.as_str())
        .bind(monthly_usage)
        .bind(updated_at)
}

pub struct SqliteLeaderboardRepository {
    base: SqliteRepositoryBase,
}

impl SqliteLeaderboardRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }
}

#[async_trait]
impl LeaderboardRepository for SqliteLeaderboardRepository {
    async fn list_all(&self) -> Result<Vec<LeaderboardEntry>, DomainError> {
        let query = r#"
            SELECT l.user_id, u.display_name, l.monthly_usage, l.updated_at
            FROM leaderboard l
            JOIN users u ON u.id = l.user_id
        "#;

        let rows: Vec<LeaderboardRow> = self
            .base
            .fetch_all(sqlx::query_as(query), "List leaderboard")
            .await?;

        Ok(rows.into_iter().map(|r| r.into_entry()).collect())
    }
}
